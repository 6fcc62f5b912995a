use shop_repo::{build_slot_store, FileSlotStore, SlotStore};
use shop_types::domain::cart::CartEngine;
use shop_types::domain::product::{Category, Product};
use shop_types::ports::cart_store::{CartStore, CART_STORAGE_KEY};

#[test]
fn file_slots_load_save_remove() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSlotStore::open(dir.path().join("carts")).unwrap();

    assert!(store.load("famini-cart:guest").unwrap().is_none());
    store.save("famini-cart:guest", "[]").unwrap();
    assert_eq!(store.load("famini-cart:guest").unwrap().as_deref(), Some("[]"));

    store.remove("famini-cart:guest").unwrap();
    store.remove("famini-cart:guest").unwrap();
    assert!(store.load("famini-cart:guest").unwrap().is_none());
}

#[test]
fn cart_survives_restart_on_file_slots() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSlotStore::open(dir.path()).unwrap();

    let mut cart = CartEngine::hydrate(store.clone());
    cart.add_to_cart(Product::new("p1", "Gelas", 40_000, Category::BambooGlass), 2)
        .unwrap();
    cart.add_to_cart(Product::new("p2", "Tumbler", 65_000, Category::LimitedEdition), 1)
        .unwrap();

    let reopened = FileSlotStore::open(dir.path()).unwrap();
    let restored = CartEngine::hydrate(reopened);
    assert_eq!(restored.lines(), cart.lines());
    assert_eq!(restored.total_price(), 145_000);
}

#[test]
fn corrupt_file_slot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSlotStore::open(dir.path()).unwrap();
    store.save(CART_STORAGE_KEY, "[{\"product\":").unwrap();

    let cart = CartEngine::hydrate(store);
    assert!(cart.is_empty());
}

#[test]
fn build_slot_store_prefers_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = build_slot_store(Some(dir.path())).unwrap();
    assert!(matches!(store, SlotStore::File(_)));
    store.save("k", "v").unwrap();
    assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
}

#[cfg(feature = "memory")]
#[test]
fn build_slot_store_defaults_to_memory() {
    let store = build_slot_store(None).unwrap();
    assert!(matches!(store, SlotStore::Memory(_)));
    let mut cart = CartEngine::hydrate(store.clone());
    cart.add_to_cart(Product::new("p1", "Gelas", 40_000, Category::BambooGlass), 1)
        .unwrap();
    assert_eq!(CartEngine::hydrate(store).total_items(), 1);
}
