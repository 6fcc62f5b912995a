use serde::{Deserialize, Serialize};
use shop_types::domain::cart::{CartEngine, CartLine};
use shop_types::domain::order::{CustomerDetails, Order};
use shop_types::domain::pricing::{PriceSummary, PricingRules};
use shop_types::ports::cart_store::CartStore;
use shop_types::ports::ShopRepository;

use super::blog_service::BlogService;
use super::cart_sessions::CartSessions;
use super::catalog_service::CatalogService;
use super::contact_service::ContactService;
use super::order_service::OrderService;
use crate::errors::AppError;

/// What a client sees of its cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total_items: u64,
    pub summary: PriceSummary,
}

impl CartView {
    fn of<S: CartStore>(cart: &CartEngine<S>, rules: &PricingRules) -> Self {
        Self {
            items: cart.lines().to_vec(),
            total_items: cart.total_items(),
            summary: cart.summary(rules),
        }
    }
}

/// Wires the cart sessions to the catalog, order, contact and blog services.
pub struct Storefront<R: ShopRepository, S: CartStore + Clone> {
    pub catalog: CatalogService<R>,
    pub orders: OrderService<R>,
    pub contact: ContactService<R>,
    pub blog: BlogService<R>,
    pub carts: CartSessions<S>,
    pub pricing: PricingRules,
}

impl<R: ShopRepository, S: CartStore + Clone> Storefront<R, S> {
    pub fn new(repo: R, slots: S, pricing: PricingRules) -> Self {
        Self {
            catalog: CatalogService::new(repo.clone()),
            orders: OrderService::new(repo.clone()),
            contact: ContactService::new(repo.clone()),
            blog: BlogService::new(repo),
            carts: CartSessions::new(slots),
            pricing,
        }
    }

    pub fn cart(&self, session: &str) -> CartView {
        self.carts.read_cart(session, |cart| CartView::of(cart, &self.pricing))
    }

    /// Adds a catalog product to the session's cart. The line keeps the product
    /// as it was at this moment.
    pub async fn add_to_cart(
        &self,
        session: &str,
        product_id: &str,
        quantity: i64,
    ) -> Result<CartView, AppError> {
        let product = self.catalog.get_product(product_id).await?;
        self.carts.with_cart(session, |cart| {
            cart.add_to_cart(product, quantity)?;
            Ok(CartView::of(cart, &self.pricing))
        })
    }

    /// `quantity <= 0` removes the line. Unknown lines are only an error when
    /// a positive quantity is requested.
    pub fn update_quantity(
        &self,
        session: &str,
        product_id: &str,
        quantity: i64,
    ) -> Result<CartView, AppError> {
        self.carts.with_cart(session, |cart| {
            let changed = cart.update_quantity(product_id, quantity)?;
            if !changed && quantity > 0 {
                return Err(AppError::NotFound(format!("cart item {}", product_id)));
            }
            Ok(CartView::of(cart, &self.pricing))
        })
    }

    pub fn remove_from_cart(&self, session: &str, product_id: &str) -> CartView {
        self.carts.with_cart(session, |cart| {
            cart.remove_from_cart(product_id);
            CartView::of(cart, &self.pricing)
        })
    }

    pub fn clear_cart(&self, session: &str) -> CartView {
        self.carts.with_cart(session, |cart| {
            cart.clear_cart();
            CartView::of(cart, &self.pricing)
        })
    }

    /// Places an order for the session's current lines and empties the cart
    /// once the order is stored. A failed submission leaves the cart as is.
    pub async fn checkout(
        &self,
        session: &str,
        details: CustomerDetails,
    ) -> Result<Order, AppError> {
        let lines = self.carts.snapshot(session);
        if lines.is_empty() {
            return Err(AppError::BadRequest("cart is empty".into()));
        }
        let order = self
            .orders
            .place_order(details, &lines, &self.pricing)
            .await?;
        self.carts.with_cart(session, |cart| cart.clear_cart());
        tracing::debug!(%session, order_id = %order.id, "cart cleared after checkout");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_repo::memory::{InMemoryRepo, MemorySlotStore};
    use shop_types::domain::product::{Category, Product};

    async fn storefront() -> Storefront<InMemoryRepo, MemorySlotStore> {
        let shop = Storefront::new(
            InMemoryRepo::new(),
            MemorySlotStore::new(),
            PricingRules::default(),
        );
        shop.catalog
            .save_product(Product::new("bamboo", "Gelas Bambu", 45_000, Category::BambooGlass))
            .await
            .unwrap();
        shop.catalog
            .save_product(Product::new("tebu", "Gelas Tebu", 60_000, Category::SugarcanePulpGlass))
            .await
            .unwrap();
        shop
    }

    fn details() -> CustomerDetails {
        CustomerDetails {
            customer_name: "Dewi".into(),
            email: "dewi@example.id".into(),
            phone: "0812000111".into(),
            address: "Jl. Kenanga 3".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn add_uses_catalog_snapshot_and_prices_cart() {
        let shop = storefront().await;
        shop.add_to_cart("s1", "bamboo", 2).await.unwrap();
        let view = shop.add_to_cart("s1", "tebu", 1).await.unwrap();

        assert_eq!(view.total_items, 3);
        assert_eq!(view.summary.subtotal, 150_000);
        assert_eq!(view.summary.shipping_cost, 0);
        assert_eq!(view.summary.total, 150_000);
        assert_eq!(view.items[0].product.name, "Gelas Bambu");
    }

    #[tokio::test]
    async fn unknown_product_and_bad_quantity_are_rejected() {
        let shop = storefront().await;
        assert!(matches!(
            shop.add_to_cart("s1", "nope", 1).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            shop.add_to_cart("s1", "bamboo", 0).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(shop.cart("s1").items.is_empty());
    }

    #[tokio::test]
    async fn update_and_remove() {
        let shop = storefront().await;
        shop.add_to_cart("s1", "bamboo", 1).await.unwrap();

        let view = shop.update_quantity("s1", "bamboo", 5).unwrap();
        assert_eq!(view.total_items, 5);

        assert!(matches!(
            shop.update_quantity("s1", "tebu", 2),
            Err(AppError::NotFound(_))
        ));
        let view = shop.update_quantity("s1", "tebu", 0).unwrap();
        assert_eq!(view.total_items, 5);

        let view = shop.remove_from_cart("s1", "bamboo");
        assert!(view.items.is_empty());
        assert_eq!(view.summary.shipping_cost, 15_000);
    }

    #[tokio::test]
    async fn checkout_records_order_and_clears_cart() {
        let shop = storefront().await;
        shop.add_to_cart("s1", "tebu", 4).await.unwrap();
        shop.add_to_cart("s2", "bamboo", 1).await.unwrap();

        let order = shop.checkout("s1", details()).await.unwrap();
        assert_eq!(order.subtotal, 240_000);
        assert_eq!(order.discount, 24_000);
        assert_eq!(order.total, 216_000);
        assert_eq!(order.items[0].quantity, 4);

        assert!(shop.cart("s1").items.is_empty());
        assert_eq!(shop.cart("s2").total_items, 1);
        assert_eq!(shop.orders.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn browsing_carts_does_not_pile_up_sessions() {
        let shop = storefront().await;
        for i in 0..1_000 {
            assert!(shop.cart(&format!("visitor-{i}")).items.is_empty());
        }
        assert_eq!(shop.carts.active_sessions(), 0);

        shop.add_to_cart("s1", "bamboo", 1).await.unwrap();
        assert_eq!(shop.carts.active_sessions(), 1);
        shop.checkout("s1", details()).await.unwrap();
        assert_eq!(shop.carts.active_sessions(), 0);
        assert!(shop.cart("s1").items.is_empty());
    }

    #[tokio::test]
    async fn failed_checkout_keeps_cart() {
        let shop = storefront().await;
        assert!(matches!(
            shop.checkout("s1", details()).await,
            Err(AppError::BadRequest(_))
        ));

        shop.add_to_cart("s1", "bamboo", 1).await.unwrap();
        let mut bad = details();
        bad.email = "missing-at".into();
        assert!(matches!(
            shop.checkout("s1", bad).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(shop.cart("s1").total_items, 1);
    }
}
