use async_trait::async_trait;

use crate::domain::product::Product;
use crate::ports::RepoError;

#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
    /// Every product, in catalog order.
    async fn fetch_all(&self) -> Result<Vec<Product>, RepoError>;
    async fn get_product(&self, id: &str) -> Result<Option<Product>, RepoError>;
    /// Inserts or replaces by id.
    async fn upsert_product(&self, product: Product) -> Result<Product, RepoError>;
}
