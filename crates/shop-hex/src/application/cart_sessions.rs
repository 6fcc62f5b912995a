//! One cart engine per client session.
//!
//! Each session's engine sits in its own map entry, and every operation runs
//! under that entry's lock, so two requests for the same session never
//! interleave. Callers must not await inside `with_cart`.
//!
//! Only carts holding lines stay cached. Reads of an uncached session hydrate
//! a throwaway engine, and an engine left empty by an operation is dropped;
//! its slot already holds the empty state.

use dashmap::DashMap;
use shop_types::domain::cart::{CartEngine, CartLine};
use shop_types::ports::cart_store::{CartStore, CART_STORAGE_KEY};

pub const DEFAULT_SESSION: &str = "guest";

pub struct CartSessions<S: CartStore + Clone> {
    store: S,
    carts: DashMap<String, CartEngine<S>>,
}

impl<S: CartStore + Clone> CartSessions<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            carts: DashMap::new(),
        }
    }

    pub fn slot_key(session: &str) -> String {
        format!("{CART_STORAGE_KEY}:{session}")
    }

    /// Runs `f` against the session's cart, hydrating it from its slot on
    /// first use.
    pub fn with_cart<T>(&self, session: &str, f: impl FnOnce(&mut CartEngine<S>) -> T) -> T {
        let out = {
            let mut entry = self.carts.entry(session.to_string()).or_insert_with(|| {
                CartEngine::hydrate_with_key(self.store.clone(), Self::slot_key(session))
            });
            f(entry.value_mut())
        };
        // Re-checked under the entry lock, so a concurrent add keeps its engine.
        self.carts.remove_if(session, |_, cart| cart.is_empty());
        out
    }

    /// Read-only access that never caches the session.
    pub fn read_cart<T>(&self, session: &str, f: impl FnOnce(&CartEngine<S>) -> T) -> T {
        if let Some(cart) = self.carts.get(session) {
            return f(cart.value());
        }
        let cart = CartEngine::hydrate_with_key(self.store.clone(), Self::slot_key(session));
        f(&cart)
    }

    pub fn snapshot(&self, session: &str) -> Vec<CartLine> {
        self.read_cart(session, |cart| cart.lines().to_vec())
    }

    /// Drops the in-memory engine; the slot keeps its contents.
    pub fn evict(&self, session: &str) -> bool {
        self.carts.remove(session).is_some()
    }

    pub fn active_sessions(&self) -> usize {
        self.carts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_repo::memory::MemorySlotStore;
    use shop_types::domain::product::{Category, Product};

    fn cup(id: &str) -> Product {
        Product::new(id, "Gelas", 20_000, Category::BambooGlass)
    }

    #[test]
    fn sessions_are_isolated() {
        let sessions = CartSessions::new(MemorySlotStore::new());
        sessions
            .with_cart("alice", |c| c.add_to_cart(cup("p1"), 2))
            .unwrap();
        sessions
            .with_cart("bob", |c| c.add_to_cart(cup("p2"), 1))
            .unwrap();

        assert_eq!(sessions.with_cart("alice", |c| c.total_items()), 2);
        assert_eq!(sessions.snapshot("bob")[0].product.id, "p2");
        assert_eq!(sessions.active_sessions(), 2);
    }

    #[test]
    fn reads_do_not_cache_sessions() {
        let sessions = CartSessions::new(MemorySlotStore::new());
        for i in 0..10_000 {
            let id = format!("s{i}");
            assert_eq!(sessions.read_cart(&id, |c| c.total_items()), 0);
            assert!(sessions.snapshot(&id).is_empty());
        }
        assert_eq!(sessions.active_sessions(), 0);
    }

    #[test]
    fn emptied_carts_are_dropped_but_slot_survives() {
        let store = MemorySlotStore::new();
        let sessions = CartSessions::new(store.clone());

        for i in 0..100 {
            let id = format!("s{i}");
            let res = sessions.with_cart(&id, |c| c.add_to_cart(cup("p1"), 0));
            assert!(res.is_err());
        }
        assert_eq!(sessions.active_sessions(), 0);

        sessions
            .with_cart("alice", |c| c.add_to_cart(cup("p1"), 1))
            .unwrap();
        sessions
            .with_cart("alice", |c| c.add_to_cart(cup("p2"), 1))
            .unwrap();
        assert_eq!(sessions.active_sessions(), 1);

        sessions.with_cart("alice", |c| c.remove_from_cart("p1"));
        assert_eq!(sessions.active_sessions(), 1);
        sessions.with_cart("alice", |c| c.clear_cart());
        assert_eq!(sessions.active_sessions(), 0);
        assert_eq!(store.load("famini-cart:alice").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn read_sees_uncached_slot_contents() {
        let store = MemorySlotStore::new();
        let sessions = CartSessions::new(store.clone());
        sessions
            .with_cart("bob", |c| c.add_to_cart(cup("p1"), 2))
            .unwrap();
        assert!(sessions.evict("bob"));

        assert_eq!(sessions.read_cart("bob", |c| c.total_items()), 2);
        assert_eq!(sessions.active_sessions(), 0);
    }

    #[test]
    fn evicted_cart_rehydrates_from_slot() {
        let store = MemorySlotStore::new();
        let sessions = CartSessions::new(store.clone());
        sessions
            .with_cart("alice", |c| c.add_to_cart(cup("p1"), 3))
            .unwrap();

        assert!(sessions.evict("alice"));
        assert!(store.load("famini-cart:alice").unwrap().is_some());
        assert_eq!(sessions.with_cart("alice", |c| c.total_items()), 3);
    }
}
