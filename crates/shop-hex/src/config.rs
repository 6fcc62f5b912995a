use anyhow::Context;
use shop_types::domain::pricing::PricingRules;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: String,
    pub database_url: Option<String>,
    /// Directory for file-backed cart slots; carts live in memory when unset.
    pub cart_store_dir: Option<PathBuf>,
    pub pricing: PricingRules,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let server_port = lookup("SERVER_PORT").unwrap_or_else(|| "3000".into());
        let database_url = lookup("DATABASE_URL").filter(|v| !v.is_empty());
        let cart_store_dir = lookup("CART_STORE_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let defaults = PricingRules::default();
        let amount = |key: &str, default: u64| parse_or(&lookup, key, default);
        let pricing = PricingRules {
            free_shipping_above: amount("FREE_SHIPPING_ABOVE", defaults.free_shipping_above)?,
            flat_shipping: amount("FLAT_SHIPPING", defaults.flat_shipping)?,
            discount_above: amount("DISCOUNT_ABOVE", defaults.discount_above)?,
            discount_percent: amount("DISCOUNT_PERCENT", defaults.discount_percent)?,
        };
        if pricing.discount_percent > 100 {
            anyhow::bail!("DISCOUNT_PERCENT must be between 0 and 100");
        }

        let seed_demo_data = lookup("SEED_DEMO_DATA")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            server_port,
            database_url,
            cart_store_dir,
            pricing,
            seed_demo_data,
        })
    }
}

fn parse_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> anyhow::Result<u64> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
        None => Ok(default),
    }
}
