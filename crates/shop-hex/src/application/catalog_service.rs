use serde::{Deserialize, Serialize};
use std::str::FromStr;
use shop_types::domain::product::{Category, Product};
use shop_types::ports::product_catalog::ProductCatalog;

use crate::errors::AppError;

pub const FEATURED_LIMIT: usize = 3;
pub const RELATED_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Popular products first.
    #[default]
    Popular,
    /// New arrivals first.
    Newest,
    PriceLow,
    PriceHigh,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(SortOrder::Popular),
            "newest" => Ok(SortOrder::Newest),
            "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            other => Err(AppError::BadRequest(format!("unknown sort: {}", other))),
        }
    }
}

/// Keeps products in `category` (all when `None`) and orders them by `sort`.
/// Ties keep catalog order.
pub fn filter_and_sort(
    products: Vec<Product>,
    category: Option<Category>,
    sort: SortOrder,
) -> Vec<Product> {
    let mut list: Vec<Product> = match category {
        Some(c) => products.into_iter().filter(|p| p.category == c).collect(),
        None => products,
    };
    match sort {
        SortOrder::Popular => list.sort_by_key(|p| !p.is_popular),
        SortOrder::Newest => list.sort_by_key(|p| !p.is_new),
        SortOrder::PriceLow => list.sort_by_key(|p| p.price),
        SortOrder::PriceHigh => list.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    list
}

pub struct CatalogService<C: ProductCatalog> {
    catalog: C,
}

impl<C: ProductCatalog> CatalogService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub async fn list_products(
        &self,
        category: Option<Category>,
        sort: SortOrder,
    ) -> Result<Vec<Product>, AppError> {
        let all = self.catalog.fetch_all().await?;
        Ok(filter_and_sort(all, category, sort))
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, AppError> {
        match self.catalog.get_product(id).await? {
            Some(p) => Ok(p),
            None => Err(AppError::NotFound(format!("product {}", id))),
        }
    }

    pub async fn featured_products(&self) -> Result<Vec<Product>, AppError> {
        let all = self.catalog.fetch_all().await?;
        Ok(all
            .into_iter()
            .filter(|p| p.is_popular)
            .take(FEATURED_LIMIT)
            .collect())
    }

    /// Other products from the same category as `id`.
    pub async fn related_products(&self, id: &str) -> Result<Vec<Product>, AppError> {
        let product = self.get_product(id).await?;
        let all = self.catalog.fetch_all().await?;
        Ok(all
            .into_iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(RELATED_LIMIT)
            .collect())
    }

    pub async fn save_product(&self, product: Product) -> Result<Product, AppError> {
        if product.id.trim().is_empty() || product.name.trim().is_empty() {
            return Err(AppError::BadRequest("product id and name are required".into()));
        }
        Ok(self.catalog.upsert_product(product).await?)
    }
}
