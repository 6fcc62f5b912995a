//! Threshold-based shipping and discount rules.
//!
//! Both thresholds are strict: a subtotal equal to the threshold does not
//! qualify.

use serde::{Deserialize, Serialize};

pub const FREE_SHIPPING_ABOVE: u64 = 100_000;
pub const FLAT_SHIPPING: u64 = 15_000;
pub const DISCOUNT_ABOVE: u64 = 200_000;
pub const DISCOUNT_PERCENT: u64 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingRules {
    pub free_shipping_above: u64,
    pub flat_shipping: u64,
    pub discount_above: u64,
    pub discount_percent: u64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_above: FREE_SHIPPING_ABOVE,
            flat_shipping: FLAT_SHIPPING,
            discount_above: DISCOUNT_ABOVE,
            discount_percent: DISCOUNT_PERCENT,
        }
    }
}

impl PricingRules {
    pub fn shipping_cost(&self, subtotal: u64) -> u64 {
        if subtotal > self.free_shipping_above {
            0
        } else {
            self.flat_shipping
        }
    }

    /// Fractional units are truncated.
    pub fn discount(&self, subtotal: u64) -> u64 {
        if subtotal > self.discount_above {
            subtotal.saturating_mul(self.discount_percent) / 100
        } else {
            0
        }
    }

    pub fn summarize(&self, subtotal: u64) -> PriceSummary {
        let shipping_cost = self.shipping_cost(subtotal);
        let discount = self.discount(subtotal);
        PriceSummary {
            subtotal,
            shipping_cost,
            discount,
            total: subtotal.saturating_add(shipping_cost).saturating_sub(discount),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PriceSummary {
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub discount: u64,
    pub total: u64,
}

impl PriceSummary {
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_cost == 0
    }
}
