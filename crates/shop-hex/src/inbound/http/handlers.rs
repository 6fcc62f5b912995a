use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::session::CartSession;
use crate::application::catalog_service::SortOrder;
use crate::application::storefront::{CartView, Storefront};
use crate::errors::AppError;
use shop_types::domain::blog::BlogPost;
use shop_types::domain::contact::ContactMessage;
use shop_types::domain::order::{CustomerDetails, Order, OrderStatus};
use shop_types::domain::product::{Category, Product};
use shop_types::ports::cart_store::CartStore;
use shop_types::ports::ShopRepository;

pub(super) type Shop<R, S> = State<Arc<Storefront<R, S>>>;

#[derive(Deserialize, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub sort: Option<String>,
}

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    #[serde(default = "one")]
    pub quantity: i64,
}

fn one() -> i64 {
    1
}

#[derive(Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    order_id: String,
    total: u64,
    status: OrderStatus,
}

impl From<Order> for CheckoutResponse {
    fn from(o: Order) -> Self {
        Self {
            order_id: o.id.to_string(),
            total: o.total,
            status: o.status,
        }
    }
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|e| AppError::BadRequest(e.to_string()))
}

pub(super) async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

pub(super) async fn list_products<R, S>(
    State(shop): Shop<R, S>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    let category = match query.category.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(label) => Some(
            label
                .parse::<Category>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        ),
    };
    let sort = match query.sort.as_deref() {
        None | Some("") => SortOrder::default(),
        Some(s) => s.parse()?,
    };
    Ok(Json(shop.catalog.list_products(category, sort).await?))
}

pub(super) async fn featured_products<R, S>(
    State(shop): Shop<R, S>,
) -> Result<Json<Vec<Product>>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    Ok(Json(shop.catalog.featured_products().await?))
}

pub(super) async fn get_product<R, S>(
    State(shop): Shop<R, S>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    Ok(Json(shop.catalog.get_product(&id).await?))
}

pub(super) async fn related_products<R, S>(
    State(shop): Shop<R, S>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    Ok(Json(shop.catalog.related_products(&id).await?))
}

pub(super) async fn get_cart<R, S>(State(shop): Shop<R, S>, session: CartSession) -> Json<CartView>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    Json(shop.cart(session.as_str()))
}

pub(super) async fn add_item<R, S>(
    State(shop): Shop<R, S>,
    session: CartSession,
    Json(payload): Json<AddItemRequest>,
) -> Result<Json<CartView>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    let view = shop
        .add_to_cart(session.as_str(), &payload.product_id, payload.quantity)
        .await?;
    Ok(Json(view))
}

pub(super) async fn update_item<R, S>(
    State(shop): Shop<R, S>,
    session: CartSession,
    Path(product_id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    let view = shop.update_quantity(session.as_str(), &product_id, payload.quantity)?;
    Ok(Json(view))
}

pub(super) async fn remove_item<R, S>(
    State(shop): Shop<R, S>,
    session: CartSession,
    Path(product_id): Path<String>,
) -> Json<CartView>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    Json(shop.remove_from_cart(session.as_str(), &product_id))
}

pub(super) async fn clear_cart<R, S>(
    State(shop): Shop<R, S>,
    session: CartSession,
) -> Json<CartView>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    Json(shop.clear_cart(session.as_str()))
}

pub(super) async fn checkout<R, S>(
    State(shop): Shop<R, S>,
    session: CartSession,
    Json(details): Json<CustomerDetails>,
) -> Result<(StatusCode, Json<CheckoutResponse>), AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    let order = shop.checkout(session.as_str(), details).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

pub(super) async fn list_orders<R, S>(
    State(shop): Shop<R, S>,
) -> Result<Json<Vec<Order>>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    Ok(Json(shop.orders.list_orders().await?))
}

pub(super) async fn get_order<R, S>(
    State(shop): Shop<R, S>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    let order = shop.orders.get_order(parse_id(&id)?).await?;
    Ok(Json(order))
}

pub(super) async fn update_order_status<R, S>(
    State(shop): Shop<R, S>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    let updated = shop
        .orders
        .update_status(parse_id(&id)?, payload.status)
        .await?;
    Ok(Json(updated))
}

pub(super) async fn submit_contact<R, S>(
    State(shop): Shop<R, S>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactMessage>), AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    let msg = shop
        .contact
        .submit(&payload.name, &payload.email, &payload.message)
        .await?;
    Ok((StatusCode::CREATED, Json(msg)))
}

pub(super) async fn list_blog<R, S>(
    State(shop): Shop<R, S>,
) -> Result<Json<Vec<BlogPost>>, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    Ok(Json(shop.blog.list_posts().await?))
}
