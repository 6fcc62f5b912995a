use serde::Deserialize;
use serde_json::json;
use shop_hex::application::storefront::{CartView, Storefront};
use shop_hex::inbound::http::{HttpServer, HttpServerConfig, SESSION_HEADER};
use shop_repo::memory::{InMemoryRepo, MemorySlotStore};
use shop_types::domain::order::{Order, OrderStatus};
use shop_types::domain::pricing::PricingRules;
use shop_types::domain::product::{Category, Product};

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[derive(Deserialize)]
struct Created {
    order_id: String,
    total: u64,
    status: OrderStatus,
}

async fn start() -> (String, tokio::task::JoinHandle<()>) {
    let port = find_free_port();
    let config = HttpServerConfig {
        port: port.to_string(),
    };
    let shop = Storefront::new(
        InMemoryRepo::new(),
        MemorySlotStore::new(),
        PricingRules::default(),
    );
    for p in [
        Product::new("bb-1", "Gelas Bambu", 45_000, Category::BambooGlass).popular(),
        Product::new("bb-2", "Gelas Bambu Mini", 30_000, Category::BambooGlass).new_arrival(),
        Product::new("at-1", "Gelas Ampas Tebu", 35_000, Category::SugarcanePulpGlass).popular(),
    ] {
        shop.catalog.save_product(p).await.unwrap();
    }
    shop.blog
        .publish("Kenapa bambu?", Some("Bambu tumbuh cepat.".into()), None)
        .await
        .unwrap();

    let server = HttpServer::new(shop, config).await.unwrap();
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    // Give the server a moment to start.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (format!("http://127.0.0.1:{}", port), handle)
}

#[tokio::test]
async fn catalog_routes() {
    let (addr, handle) = start().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", addr)).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    let list: Vec<Product> = client
        .get(format!("{}/products", addr))
        .query(&[("category", "Gelas Bambu"), ("sort", "price-low")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<_> = list.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["bb-2", "bb-1"]);

    let all: Vec<Product> = client
        .get(format!("{}/products", addr))
        .query(&[("category", "all")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let res = client
        .get(format!("{}/products?category=Plastik", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let featured: Vec<Product> = client
        .get(format!("{}/products/featured", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(featured.len(), 2);

    let related: Vec<Product> = client
        .get(format!("{}/products/bb-1/related", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, "bb-2");

    let res = client
        .get(format!("{}/products/nope", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/products?sort=cheapest", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("cheapest"));

    let posts: serde_json::Value = client
        .get(format!("{}/blog", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(posts[0]["read_time"], "5 min read");

    handle.abort();
}

#[tokio::test]
async fn cart_checkout_and_orders_over_http() {
    let (addr, handle) = start().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/cart/items", addr))
        .header(SESSION_HEADER, "tab-1")
        .json(&json!({ "product_id": "bb-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let view: CartView = res.json().await.unwrap();
    assert_eq!(view.total_items, 1);
    assert_eq!(view.summary.shipping_cost, 15_000);

    let view: CartView = client
        .patch(format!("{}/cart/items/bb-1", addr))
        .header(SESSION_HEADER, "tab-1")
        .json(&json!({ "quantity": 3 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view.summary.subtotal, 135_000);
    assert_eq!(view.summary.total, 135_000);

    // Other sessions do not see this cart.
    let guest: CartView = client
        .get(format!("{}/cart", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(guest.items.is_empty());

    let res = client
        .post(format!("{}/checkout", addr))
        .header(SESSION_HEADER, "tab-1")
        .json(&json!({
            "customer_name": "Budi",
            "email": "budi@example.id",
            "phone": "0813",
            "address": "Jl. Anggrek 2",
            "payment_method": "transfer"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let created: Created = res.json().await.unwrap();
    assert_eq!(created.total, 135_000);
    assert_eq!(created.status, OrderStatus::Pending);

    let after: CartView = client
        .get(format!("{}/cart", addr))
        .header(SESSION_HEADER, "tab-1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(after.items.is_empty());

    let fetched: Order = client
        .get(format!("{}/orders/{}", addr, created.order_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.customer_name, "Budi");
    assert_eq!(fetched.items[0].quantity, 3);

    let res = client
        .patch(format!("{}/orders/{}/status", addr, created.order_id))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let updated: Order = res.json().await.unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);

    let list: Vec<Order> = client
        .get(format!("{}/orders", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 1);

    handle.abort();
}

#[tokio::test]
async fn bad_request_and_not_found_paths() {
    let (addr, handle) = start().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/checkout", addr))
        .json(&json!({
            "customer_name": "Empty",
            "email": "e@example.id",
            "phone": "1",
            "address": "x"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/cart/items", addr))
        .json(&json!({ "product_id": "bb-1", "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/cart/items", addr))
        .json(&json!({ "product_id": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/cart", addr))
        .header(SESSION_HEADER, "../etc")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/orders/not-a-uuid", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/orders/{}", addr, uuid::Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/contact", addr))
        .json(&json!({ "name": "Tia", "email": "tia", "message": "halo" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/contact", addr))
        .json(&json!({ "name": "Tia", "email": "tia@example.id", "message": "halo" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);

    handle.abort();
}
