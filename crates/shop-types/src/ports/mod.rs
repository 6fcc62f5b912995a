pub mod blog_repository;
pub mod cart_store;
pub mod contact_repository;
pub mod order_repository;
pub mod product_catalog;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),
}

/// Everything the storefront needs from one storage backend.
pub trait ShopRepository:
    product_catalog::ProductCatalog
    + order_repository::OrderRepository
    + contact_repository::ContactRepository
    + blog_repository::BlogRepository
    + Clone
{
}

impl<T> ShopRepository for T where
    T: product_catalog::ProductCatalog
        + order_repository::OrderRepository
        + contact_repository::ContactRepository
        + blog_repository::BlogRepository
        + Clone
{
}
