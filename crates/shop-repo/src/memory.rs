use async_trait::async_trait;
use dashmap::DashMap;
use shop_types::domain::blog::BlogRecord;
use shop_types::domain::contact::ContactMessage;
use shop_types::domain::order::{Order, OrderStatus};
use shop_types::domain::product::Product;
use shop_types::ports::blog_repository::BlogRepository;
use shop_types::ports::cart_store::{CartStore, StoreError};
use shop_types::ports::contact_repository::ContactRepository;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_catalog::ProductCatalog;
use shop_types::ports::RepoError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct InMemoryRepo {
    /// Products keyed by id, tagged with their first-insert sequence number.
    pub products: Arc<DashMap<String, (u64, Product)>>,
    pub orders: Arc<DashMap<Uuid, Order>>,
    pub contacts: Arc<DashMap<Uuid, ContactMessage>>,
    pub posts: Arc<DashMap<String, BlogRecord>>,
    seq: Arc<AtomicU64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            products: Arc::new(DashMap::new()),
            orders: Arc::new(DashMap::new()),
            contacts: Arc::new(DashMap::new()),
            posts: Arc::new(DashMap::new()),
            seq: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductCatalog for InMemoryRepo {
    async fn fetch_all(&self) -> Result<Vec<Product>, RepoError> {
        let mut rows: Vec<(u64, Product)> =
            self.products.iter().map(|kv| kv.value().clone()).collect();
        rows.sort_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, p)| p).collect())
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, RepoError> {
        Ok(self.products.get(id).map(|r| r.value().1.clone()))
    }

    async fn upsert_product(&self, product: Product) -> Result<Product, RepoError> {
        let mut entry = self
            .products
            .entry(product.id.clone())
            .or_insert_with(|| (self.seq.fetch_add(1, Ordering::Relaxed), product.clone()));
        entry.value_mut().1 = product.clone();
        Ok(product)
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn create(&self, order: Order) -> Result<Order, RepoError> {
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        Ok(self.orders.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        let mut list: Vec<Order> = self.orders.iter().map(|kv| kv.value().clone()).collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoError> {
        if let Some(mut v) = self.orders.get_mut(&id) {
            v.update_status(status);
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }
}

#[async_trait]
impl ContactRepository for InMemoryRepo {
    async fn create_contact(&self, msg: ContactMessage) -> Result<ContactMessage, RepoError> {
        self.contacts.insert(msg.id, msg.clone());
        Ok(msg)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactMessage>, RepoError> {
        let mut list: Vec<ContactMessage> =
            self.contacts.iter().map(|kv| kv.value().clone()).collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }
}

#[async_trait]
impl BlogRepository for InMemoryRepo {
    async fn create_post(&self, post: BlogRecord) -> Result<BlogRecord, RepoError> {
        self.posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<BlogRecord>, RepoError> {
        let mut list: Vec<BlogRecord> = self.posts.iter().map(|kv| kv.value().clone()).collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }
}

/// Process-local cart slots. Contents do not survive a restart.
#[derive(Clone, Default)]
pub struct MemorySlotStore {
    pub slots: Arc<DashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemorySlotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).map(|v| v.clone()))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.slots.remove(key);
        Ok(())
    }
}
