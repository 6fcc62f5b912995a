use shop_app::seed::seed_demo_data;
use shop_hex::application::storefront::Storefront;
use shop_hex::config::Config;
use shop_hex::inbound::http::{HttpServer, HttpServerConfig};
use shop_repo::{build_repo, build_slot_store, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for DATABASE_URL / SERVER_PORT / CART_STORE_DIR when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    let repo: Repo = build_repo(config.database_url.as_deref()).await?;
    let slots = build_slot_store(config.cart_store_dir.as_deref())?;
    tracing::info!(backend = repo.backend(), "repository ready");

    let shop = Storefront::new(repo, slots, config.pricing);
    if config.seed_demo_data {
        seed_demo_data(&shop).await?;
    }

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(shop, server_cfg).await?;
    http.run().await
}
