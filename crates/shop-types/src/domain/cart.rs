//! Session cart: an ordered list of product snapshots with quantities.
//!
//! The engine owns its lines and writes them back to its storage slot after
//! every change. Storage trouble never fails an operation: an unreadable or
//! malformed slot hydrates as an empty cart and a failed write only logs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::pricing::{PriceSummary, PricingRules};
use crate::domain::product::Product;
use crate::ports::cart_store::{CartStore, CART_STORAGE_KEY};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    #[error("quantity for {0} is too large")]
    QuantityOverflow(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

pub struct CartEngine<S: CartStore> {
    store: S,
    key: String,
    lines: Vec<CartLine>,
}

impl<S: CartStore> CartEngine<S> {
    /// Engine bound to the default slot, loaded from whatever it holds.
    pub fn hydrate(store: S) -> Self {
        Self::hydrate_with_key(store, CART_STORAGE_KEY)
    }

    pub fn hydrate_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let lines = load_lines(&store, &key);
        tracing::debug!(slot = %key, lines = lines.len(), "cart hydrated");
        Self { store, key, lines }
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantity` of `product`, merging into an existing line for the same
    /// product id. The stored snapshot is the one captured when the line was
    /// first created.
    pub fn add_to_cart(&mut self, product: Product, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let qty =
            u32::try_from(quantity).map_err(|_| CartError::QuantityOverflow(product.id.clone()))?;

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(qty)
                .ok_or_else(|| CartError::QuantityOverflow(product.id.clone()))?;
        } else {
            self.lines.push(CartLine {
                product,
                quantity: qty,
            });
        }
        self.persist();
        Ok(())
    }

    /// Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);
        let removed = self.lines.len() < before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Replaces the quantity of an existing line; `quantity <= 0` removes it.
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<bool, CartError> {
        if quantity <= 0 {
            return Ok(self.remove_from_cart(product_id));
        }
        let qty = u32::try_from(quantity)
            .map_err(|_| CartError::QuantityOverflow(product_id.to_string()))?;
        match self.lines.iter_mut().find(|l| l.product.id == product_id) {
            Some(line) => {
                line.quantity = qty;
                self.persist();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.persist();
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn total_price(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.subtotal()))
    }

    pub fn summary(&self, rules: &PricingRules) -> PriceSummary {
        rules.summarize(self.total_price())
    }

    fn persist(&self) {
        let doc = match serde_json::to_string(&self.lines) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(slot = %self.key, error = %e, "failed to encode cart");
                return;
            }
        };
        if let Err(e) = self.store.save(&self.key, &doc) {
            tracing::warn!(slot = %self.key, error = %e, "failed to persist cart");
        }
    }
}

fn load_lines<S: CartStore>(store: &S, key: &str) -> Vec<CartLine> {
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(slot = %key, error = %e, "failed to read stored cart; starting empty");
            return Vec::new();
        }
    };
    let lines: Vec<CartLine> = match serde_json::from_str(&raw) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(slot = %key, error = %e, "stored cart is malformed; starting empty");
            return Vec::new();
        }
    };

    // A document that breaks line invariants counts as malformed too.
    let valid = {
        let mut seen = HashSet::new();
        lines
            .iter()
            .all(|l| l.quantity >= 1 && seen.insert(l.product.id.as_str()))
    };
    if !valid {
        tracing::warn!(slot = %key, "stored cart has invalid lines; starting empty");
        return Vec::new();
    }
    lines
}
