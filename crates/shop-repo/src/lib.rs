#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use shop_types::domain::blog::BlogRecord;
use shop_types::domain::contact::ContactMessage;
use shop_types::domain::order::*;
use shop_types::domain::product::Product;
use shop_types::ports::blog_repository::BlogRepository;
use shop_types::ports::cart_store::{CartStore, StoreError};
use shop_types::ports::contact_repository::ContactRepository;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_catalog::ProductCatalog;
use shop_types::ports::RepoError;
use std::path::Path;
use uuid::Uuid;

pub mod file_slot;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file_slot::FileSlotStore;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://famini.db";
pub const DEFAULT_CART_DIR: &str = ".famini-carts";

#[derive(Clone)]
pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Self> {
        if let Some(url) = url {
            tracing::warn!(%url, "sqlite support not compiled in; using in-memory repo");
        }
        Ok(Repo::Memory(crate::memory::InMemoryRepo::new()))
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or(DEFAULT_DATABASE_URL);
        let sqlite = sqlite::SqliteRepo::new(url).await?;
        Ok(Repo::Sqlite(sqlite))
    }

    // Both compiled in: a configured URL selects sqlite.
    #[cfg(all(feature = "sqlite", feature = "memory"))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        match database_url {
            Some(url) => Ok(Repo::Sqlite(sqlite::SqliteRepo::new(url).await?)),
            None => Ok(Repo::Memory(crate::memory::InMemoryRepo::new())),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(_) => "sqlite",
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $r:ident => $call:expr) => {
        match $self {
            #[cfg(feature = "memory")]
            Repo::Memory($r) => $call,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite($r) => $call,
        }
    };
}

#[async_trait::async_trait]
impl ProductCatalog for Repo {
    async fn fetch_all(&self) -> Result<Vec<Product>, RepoError> {
        dispatch!(self, r => r.fetch_all().await)
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, RepoError> {
        dispatch!(self, r => r.get_product(id).await)
    }

    async fn upsert_product(&self, product: Product) -> Result<Product, RepoError> {
        dispatch!(self, r => r.upsert_product(product).await)
    }
}

#[async_trait::async_trait]
impl OrderRepository for Repo {
    async fn create(&self, order: Order) -> Result<Order, RepoError> {
        dispatch!(self, r => r.create(order).await)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        dispatch!(self, r => r.get(id).await)
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        dispatch!(self, r => r.list().await)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoError> {
        dispatch!(self, r => r.update_status(id, status).await)
    }
}

#[async_trait::async_trait]
impl ContactRepository for Repo {
    async fn create_contact(&self, msg: ContactMessage) -> Result<ContactMessage, RepoError> {
        dispatch!(self, r => r.create_contact(msg).await)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactMessage>, RepoError> {
        dispatch!(self, r => r.list_contacts().await)
    }
}

#[async_trait::async_trait]
impl BlogRepository for Repo {
    async fn create_post(&self, post: BlogRecord) -> Result<BlogRecord, RepoError> {
        dispatch!(self, r => r.create_post(post).await)
    }

    async fn list_posts(&self) -> Result<Vec<BlogRecord>, RepoError> {
        dispatch!(self, r => r.list_posts().await)
    }
}

/// Cart slot backend chosen at startup.
#[derive(Clone)]
pub enum SlotStore {
    #[cfg(feature = "memory")]
    Memory(memory::MemorySlotStore),
    File(FileSlotStore),
}

/// File slots when a directory is given, otherwise process memory (or the
/// default directory when the `memory` feature is off).
pub fn build_slot_store(dir: Option<&Path>) -> anyhow::Result<SlotStore> {
    match dir {
        Some(dir) => Ok(SlotStore::File(FileSlotStore::open(dir)?)),
        None => default_slot_store(),
    }
}

#[cfg(feature = "memory")]
fn default_slot_store() -> anyhow::Result<SlotStore> {
    Ok(SlotStore::Memory(memory::MemorySlotStore::new()))
}

#[cfg(not(feature = "memory"))]
fn default_slot_store() -> anyhow::Result<SlotStore> {
    Ok(SlotStore::File(FileSlotStore::open(DEFAULT_CART_DIR)?))
}

impl CartStore for SlotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            #[cfg(feature = "memory")]
            SlotStore::Memory(s) => s.load(key),
            SlotStore::File(s) => s.load(key),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            #[cfg(feature = "memory")]
            SlotStore::Memory(s) => s.save(key, value),
            SlotStore::File(s) => s.save(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match self {
            #[cfg(feature = "memory")]
            SlotStore::Memory(s) => s.remove(key),
            SlotStore::File(s) => s.remove(key),
        }
    }
}
