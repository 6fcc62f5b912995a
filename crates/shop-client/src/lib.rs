use std::time::Duration;

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shop_types::domain::blog::BlogPost;
use shop_types::domain::cart::CartLine;
use shop_types::domain::contact::ContactMessage;
use shop_types::domain::order::{CustomerDetails, Order, OrderStatus};
use shop_types::domain::pricing::PriceSummary;
use shop_types::domain::product::{Category, Product};

pub const SESSION_HEADER: &str = "x-cart-session";

#[derive(Clone)]
pub struct ShopClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    session: Option<String>,
    client: Option<reqwest::Client>,
}

/// HTTP client for the storefront API. Cart calls go to the session set with
/// `with_session`, or to the server's guest cart when none is set.
#[derive(Clone)]
pub struct ShopClient {
    base: Url,
    session: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total_items: u64,
    pub summary: PriceSummary,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub total: u64,
    pub status: OrderStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct AddItemRequest<'a> {
    product_id: &'a str,
    quantity: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct UpdateQuantityRequest {
    quantity: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct UpdateStatusRequest {
    status: OrderStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ContactRequest<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ShopClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<ShopClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(ShopClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            session: None,
            client: None,
        })
    }

    /// Same connection pool, different cart.
    pub fn with_session(&self, session: impl Into<String>) -> Self {
        Self {
            base: self.base.clone(),
            session: Some(session.into()),
            client: self.client.clone(),
        }
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    fn request(&self, method: Method, path: &str) -> anyhow::Result<RequestBuilder> {
        let mut req = self.client.request(method, self.url(path)?);
        if let Some(session) = &self.session {
            req = req.header(SESSION_HEADER, session);
        }
        Ok(req)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> anyhow::Result<T> {
        let res = check(req.send().await?).await?;
        Ok(res.json().await?)
    }

    pub async fn health(&self) -> anyhow::Result<()> {
        check(self.request(Method::GET, "health")?.send().await?).await?;
        Ok(())
    }

    pub async fn list_products(
        &self,
        category: Option<Category>,
        sort: Option<&str>,
    ) -> anyhow::Result<Vec<Product>> {
        let mut req = self.request(Method::GET, "products")?;
        if let Some(c) = category {
            req = req.query(&[("category", c.label())]);
        }
        if let Some(s) = sort {
            req = req.query(&[("sort", s)]);
        }
        self.send(req).await
    }

    pub async fn featured_products(&self) -> anyhow::Result<Vec<Product>> {
        self.send(self.request(Method::GET, "products/featured")?)
            .await
    }

    pub async fn get_product(&self, id: &str) -> anyhow::Result<Product> {
        self.send(self.request(Method::GET, &format!("products/{id}"))?)
            .await
    }

    pub async fn related_products(&self, id: &str) -> anyhow::Result<Vec<Product>> {
        self.send(self.request(Method::GET, &format!("products/{id}/related"))?)
            .await
    }

    pub async fn cart(&self) -> anyhow::Result<CartView> {
        self.send(self.request(Method::GET, "cart")?).await
    }

    pub async fn add_to_cart(&self, product_id: &str, quantity: i64) -> anyhow::Result<CartView> {
        let req = self
            .request(Method::POST, "cart/items")?
            .json(&AddItemRequest {
                product_id,
                quantity,
            });
        self.send(req).await
    }

    pub async fn update_quantity(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> anyhow::Result<CartView> {
        let req = self
            .request(Method::PATCH, &format!("cart/items/{product_id}"))?
            .json(&UpdateQuantityRequest { quantity });
        self.send(req).await
    }

    pub async fn remove_from_cart(&self, product_id: &str) -> anyhow::Result<CartView> {
        self.send(self.request(Method::DELETE, &format!("cart/items/{product_id}"))?)
            .await
    }

    pub async fn clear_cart(&self) -> anyhow::Result<CartView> {
        self.send(self.request(Method::DELETE, "cart")?).await
    }

    pub async fn checkout(&self, details: &CustomerDetails) -> anyhow::Result<CheckoutResponse> {
        let created: CheckoutResponse = self
            .send(self.request(Method::POST, "checkout")?.json(details))
            .await?;
        tracing::debug!(order_id = %created.order_id, total = created.total, "checkout accepted");
        Ok(created)
    }

    pub async fn get_order(&self, id: &str) -> anyhow::Result<Order> {
        self.send(self.request(Method::GET, &format!("orders/{id}"))?)
            .await
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        self.send(self.request(Method::GET, "orders")?).await
    }

    pub async fn update_status(&self, id: &str, status: OrderStatus) -> anyhow::Result<Order> {
        let req = self
            .request(Method::PATCH, &format!("orders/{id}/status"))?
            .json(&UpdateStatusRequest { status });
        self.send(req).await
    }

    pub async fn submit_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> anyhow::Result<ContactMessage> {
        let req = self
            .request(Method::POST, "contact")?
            .json(&ContactRequest {
                name,
                email,
                message,
            });
        self.send(req).await
    }

    pub async fn list_blog(&self) -> anyhow::Result<Vec<BlogPost>> {
        self.send(self.request(Method::GET, "blog")?).await
    }
}

/// Turns a non-2xx response into an error carrying the server's message.
async fn check(res: Response) -> anyhow::Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    tracing::debug!(%status, error = %msg, "request rejected");
    anyhow::bail!("{status}: {msg}")
}

impl ShopClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<ShopClient> {
        if let Some(client) = self.client {
            return Ok(ShopClient {
                base: self.base,
                session: self.session,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(ShopClient {
            base: self.base,
            session: self.session,
            client,
        })
    }
}
