use crate::errors::AppError;
use shop_types::domain::cart::CartLine;
use shop_types::domain::order::{CustomerDetails, Order, OrderStatus};
use shop_types::domain::pricing::PricingRules;
use shop_types::ports::order_repository::OrderRepository;
use uuid::Uuid;

pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records an order for a snapshot of cart lines. The cart itself is not
    /// touched here; callers clear it once this returns `Ok`.
    pub async fn place_order(
        &self,
        details: CustomerDetails,
        lines: &[CartLine],
        rules: &PricingRules,
    ) -> Result<Order, AppError> {
        let order =
            Order::new(details, lines, rules).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let order = self.repo.create(order).await.map_err(|e| {
            tracing::warn!(error = %e, "order submission failed");
            AppError::from(e)
        })?;
        tracing::info!(
            order_id = %order.id,
            items = order.items.len(),
            total = order.total,
            "order placed"
        );
        Ok(order)
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Order, AppError> {
        match self.repo.get(id).await? {
            Some(o) => Ok(o),
            None => Err(AppError::NotFound(format!("order {}", id))),
        }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, AppError> {
        match self.repo.update_status(id, status).await? {
            Some(o) => Ok(o),
            None => Err(AppError::NotFound(format!("order {}", id))),
        }
    }
}
