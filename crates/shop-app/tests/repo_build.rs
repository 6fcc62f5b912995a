use shop_app::seed::{demo_products, seed_demo_data};
use shop_hex::application::storefront::Storefront;
use shop_hex::config::Config;
use shop_repo::{build_repo, build_slot_store, Repo};
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_catalog::ProductCatalog;
use std::collections::HashMap;

#[tokio::test]
async fn builds_sqlite_repo_from_config() {
    // Use a temp DB path for isolation.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("famini-test.db");
    let url = format!("sqlite://{}", db_path.display());
    let cart_dir = dir.path().join("carts");

    let vars: HashMap<&str, String> = HashMap::from([
        ("DATABASE_URL", url),
        ("CART_STORE_DIR", cart_dir.display().to_string()),
        ("FLAT_SHIPPING", "20000".to_string()),
    ]);
    let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

    let repo: Repo = build_repo(config.database_url.as_deref())
        .await
        .expect("build repo");
    assert_eq!(repo.backend(), "sqlite");
    // basic sanity: list should succeed and be empty
    assert!(repo.list().await.expect("list").is_empty());

    let slots = build_slot_store(config.cart_store_dir.as_deref()).unwrap();
    let shop = Storefront::new(repo.clone(), slots, config.pricing);
    seed_demo_data(&shop).await.unwrap();

    shop.add_to_cart("app", "bb-mini", 1).await.unwrap();
    assert_eq!(shop.cart("app").summary.shipping_cost, 20_000);
    assert!(cart_dir.join("famini-cart%3Aapp.json").exists());
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let repo = build_repo(None).await.unwrap();
    assert_eq!(repo.backend(), "memory");
    let shop = Storefront::new(repo.clone(), build_slot_store(None).unwrap(), Default::default());

    let first = seed_demo_data(&shop).await.unwrap();
    assert_eq!(first, demo_products().len());
    assert_eq!(seed_demo_data(&shop).await.unwrap(), 0);
    assert_eq!(repo.fetch_all().await.unwrap().len(), demo_products().len());
    assert_eq!(shop.blog.list_posts().await.unwrap().len(), 3);
}
