///  To run :
///  cargo r --example client_example
use shop_app::seed::seed_demo_data;
use shop_client::ShopClient;
use shop_hex::application::storefront::Storefront;
use shop_hex::inbound::http::{HttpServer, HttpServerConfig};
use shop_repo::{build_repo, build_slot_store};
use shop_types::domain::order::{CustomerDetails, OrderStatus, PaymentMethod};
use shop_types::domain::pricing::PricingRules;
use tempfile::tempdir;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    // Temp SQLite DB plus file-backed cart slots.
    let tmp = tempdir()?;
    let db_url = format!("sqlite://{}", tmp.path().join("famini.db").display());
    let repo = build_repo(Some(&db_url)).await?;
    let slots = build_slot_store(Some(tmp.path().join("carts").as_path()))?;

    let shop = Storefront::new(repo, slots, PricingRules::default());
    seed_demo_data(&shop).await?;
    let server = HttpServer::new(
        shop,
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = ShopClient::builder(&addr)?.with_session("demo").build()?;
    let featured = client.featured_products().await?;
    println!("Featured: {:?}", featured.iter().map(|p| &p.name).collect::<Vec<_>>());

    client.add_to_cart("bb-classic", 2).await?;
    let cart = client.add_to_cart("mx-family", 1).await?;
    println!(
        "Cart: {} items, subtotal {}, shipping {}, discount {}, total {}",
        cart.total_items,
        cart.summary.subtotal,
        cart.summary.shipping_cost,
        cart.summary.discount,
        cart.summary.total
    );

    let created = client
        .checkout(&CustomerDetails {
            customer_name: "Example".into(),
            email: "example@example.com".into(),
            phone: "08123456789".into(),
            address: "Jl. Contoh 1".into(),
            city: Some("Jakarta".into()),
            postal_code: Some("10110".into()),
            payment_method: PaymentMethod::Transfer,
        })
        .await?;
    println!("Created order id={} total={}", created.order_id, created.total);
    assert_eq!(created.status, OrderStatus::Pending);

    let updated = client
        .update_status(&created.order_id, OrderStatus::Shipped)
        .await?;
    println!("Updated status={:?}", updated.status);

    assert!(client.cart().await?.items.is_empty());

    handle.abort();
    Ok(())
}
