use axum::{
    routing::{get, patch, post},
    serve, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::handlers::*;
use crate::application::storefront::Storefront;
use shop_types::ports::cart_store::CartStore;
use shop_types::ports::ShopRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

#[derive(Clone)]
pub struct HttpServer<R, S>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    pub shop: Arc<Storefront<R, S>>,
    pub config: HttpServerConfig,
}

impl<R, S> HttpServer<R, S>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    pub async fn new(shop: Storefront<R, S>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            shop: Arc::new(shop),
            config,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = router(self.shop.clone());

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("server stopped");
        Ok(())
    }
}

/// All storefront routes with request tracing and permissive CORS.
pub fn router<R, S>(shop: Arc<Storefront<R, S>>) -> Router
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &axum::extract::Request<_>| {
            let uri = request.uri().to_string();
            let request_id = Uuid::new_v4();
            tracing::info_span!(
                "http_request",
                %request_id,
                method = %request.method(),
                uri
            )
        })
        .on_request(
            |request: &axum::extract::Request<_>, span: &tracing::Span| {
                tracing::info!(
                    parent: span,
                    method = %request.method(),
                    uri = %request.uri(),
                    "request"
                );
            },
        )
        .on_response(
            |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                tracing::info!(
                    parent: span,
                    status = %response.status(),
                    latency_ms = %latency.as_millis(),
                    "response"
                );
            },
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products::<R, S>))
        .route("/products/featured", get(featured_products::<R, S>))
        .route("/products/{id}", get(get_product::<R, S>))
        .route("/products/{id}/related", get(related_products::<R, S>))
        .route("/cart", get(get_cart::<R, S>).delete(clear_cart::<R, S>))
        .route("/cart/items", post(add_item::<R, S>))
        .route(
            "/cart/items/{product_id}",
            patch(update_item::<R, S>).delete(remove_item::<R, S>),
        )
        .route("/checkout", post(checkout::<R, S>))
        .route("/orders", get(list_orders::<R, S>))
        .route("/orders/{id}", get(get_order::<R, S>))
        .route("/orders/{id}/status", patch(update_order_status::<R, S>))
        .route("/contact", post(submit_contact::<R, S>))
        .route("/blog", get(list_blog::<R, S>))
        .layer(trace_layer)
        .layer(cors)
        .with_state(shop)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
