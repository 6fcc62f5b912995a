use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use shop_types::domain::blog::BlogRecord;
use shop_types::domain::contact::ContactMessage;
use shop_types::domain::order::{Order, OrderItem, OrderStatus, PaymentMethod};
use shop_types::domain::product::{Product, ProductRecord};
use shop_types::ports::blog_repository::BlogRepository;
use shop_types::ports::contact_repository::ContactRepository;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_catalog::ProductCatalog;
use shop_types::ports::RepoError;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

const MIGRATIONS: [&str; 5] = [
    include_str!("../migrations/0001_create_products.sql"),
    include_str!("../migrations/0002_create_orders.sql"),
    include_str!("../migrations/0003_create_order_items.sql"),
    include_str!("../migrations/0004_create_contacts.sql"),
    include_str!("../migrations/0005_create_blog_posts.sql"),
];

#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

fn db_err(e: impl std::fmt::Display) -> RepoError {
    RepoError::DbError(e.to_string())
}

fn ts(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(s: &str) -> Result<DateTime<Utc>, RepoError> {
    Ok(DateTime::parse_from_rfc3339(s)
        .map_err(db_err)?
        .with_timezone(&Utc))
}

fn to_i64(v: u64) -> Result<i64, RepoError> {
    i64::try_from(v).map_err(db_err)
}

fn to_u64(v: i64) -> Result<u64, RepoError> {
    u64::try_from(v).map_err(db_err)
}

#[derive(FromRow)]
struct DbProduct {
    id: String,
    name: String,
    price: i64,
    image_url: Option<String>,
    description: Option<String>,
    category: String,
    is_popular: bool,
    is_new: bool,
}

impl DbProduct {
    fn into_product(self) -> Result<Product, RepoError> {
        let record = ProductRecord {
            id: self.id,
            name: self.name,
            price: to_u64(self.price)?,
            image_url: self.image_url,
            description: self.description,
            category: self.category,
            is_popular: self.is_popular,
            is_new: self.is_new,
        };
        Product::try_from(record).map_err(db_err)
    }
}

#[derive(FromRow)]
struct DbOrder {
    id: String,
    customer_name: String,
    email: String,
    phone: String,
    address: String,
    city: Option<String>,
    postal_code: Option<String>,
    payment_method: String,
    subtotal: i64,
    shipping_cost: i64,
    discount: i64,
    total_price: i64,
    status: String,
    created_at: String,
    updated_at: String,
}

#[derive(FromRow)]
struct DbOrderItem {
    product_id: String,
    product_name: String,
    quantity: i64,
    price: i64,
    subtotal: i64,
}

impl DbOrder {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, RepoError> {
        let status = OrderStatus::from_str(&self.status).map_err(db_err)?;
        let payment_method: PaymentMethod = self.payment_method.parse().map_err(db_err)?;
        let id = Uuid::parse_str(&self.id).map_err(db_err)?;
        Ok(Order {
            id,
            customer_name: self.customer_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            payment_method,
            items,
            subtotal: to_u64(self.subtotal)?,
            shipping_cost: to_u64(self.shipping_cost)?,
            discount: to_u64(self.discount)?,
            total: to_u64(self.total_price)?,
            status,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

impl DbOrderItem {
    fn into_item(self) -> Result<OrderItem, RepoError> {
        Ok(OrderItem {
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: u32::try_from(self.quantity).map_err(db_err)?,
            price: to_u64(self.price)?,
            subtotal: to_u64(self.subtotal)?,
        })
    }
}

#[derive(FromRow)]
struct DbContact {
    id: String,
    name: String,
    email: String,
    message: String,
    created_at: String,
}

#[derive(FromRow)]
struct DbBlogPost {
    id: String,
    title: String,
    content: Option<String>,
    image_url: Option<String>,
    created_at: String,
}

const ORDER_COLUMNS: &str = "id, customer_name, email, phone, address, city, postal_code, \
     payment_method, subtotal, shipping_cost, discount, total_price, status, created_at, updated_at";

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        for ddl in MIGRATIONS {
            sqlx::query(ddl).execute(&pool).await?;
        }
        tracing::debug!(url = %database_url, "sqlite schema ready");

        Ok(Self { pool })
    }

    async fn load_items(&self, order_id: &str) -> Result<Vec<OrderItem>, RepoError> {
        let rows: Vec<DbOrderItem> = sqlx::query_as(
            "SELECT product_id, product_name, quantity, price, subtotal FROM order_items
             WHERE order_id = ? ORDER BY position",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(DbOrderItem::into_item).collect()
    }

    async fn hydrate_order(&self, row: DbOrder) -> Result<Order, RepoError> {
        let items = self.load_items(&row.id).await?;
        row.into_order(items)
    }
}

#[async_trait]
impl ProductCatalog for SqliteRepo {
    async fn fetch_all(&self) -> Result<Vec<Product>, RepoError> {
        let rows: Vec<DbProduct> = sqlx::query_as(
            "SELECT id, name, price, image_url, description, category, is_popular, is_new
             FROM products ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(DbProduct::into_product).collect()
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, RepoError> {
        let row: Option<DbProduct> = sqlx::query_as(
            "SELECT id, name, price, image_url, description, category, is_popular, is_new
             FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(DbProduct::into_product).transpose()
    }

    async fn upsert_product(&self, product: Product) -> Result<Product, RepoError> {
        sqlx::query(
            "INSERT INTO products (id, name, price, image_url, description, category, is_popular, is_new)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                price = excluded.price,
                image_url = excluded.image_url,
                description = excluded.description,
                category = excluded.category,
                is_popular = excluded.is_popular,
                is_new = excluded.is_new",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(to_i64(product.price)?)
        .bind(&product.image)
        .bind(&product.description)
        .bind(product.category.label())
        .bind(product.is_popular)
        .bind(product.is_new)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(product)
    }
}

#[async_trait]
impl OrderRepository for SqliteRepo {
    async fn create(&self, order: Order) -> Result<Order, RepoError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let id = order.id.to_string();

        sqlx::query(
            "INSERT INTO orders (id, customer_name, email, phone, address, city, postal_code, payment_method,
                subtotal, shipping_cost, discount, total_price, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&order.customer_name)
        .bind(&order.email)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(&order.city)
        .bind(&order.postal_code)
        .bind(order.payment_method.as_str())
        .bind(to_i64(order.subtotal)?)
        .bind(to_i64(order.shipping_cost)?)
        .bind(to_i64(order.discount)?)
        .bind(to_i64(order.total)?)
        .bind(order.status.as_str())
        .bind(ts(&order.created_at))
        .bind(ts(&order.updated_at))
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_items (order_id, position, product_id, product_name, quantity, price, subtotal)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(position as i64)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(i64::from(item.quantity))
            .bind(to_i64(item.price)?)
            .bind(to_i64(item.subtotal)?)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        match row {
            Some(r) => Ok(Some(self.hydrate_order(r).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        let rows: Vec<DbOrder> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut orders = Vec::with_capacity(rows.len());
        for r in rows {
            orders.push(self.hydrate_order(r).await?);
        }
        Ok(orders)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoError> {
        let updated = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(ts(&Utc::now()))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }
}

#[async_trait]
impl ContactRepository for SqliteRepo {
    async fn create_contact(&self, msg: ContactMessage) -> Result<ContactMessage, RepoError> {
        sqlx::query(
            "INSERT INTO contacts (id, name, email, message, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(msg.id.to_string())
        .bind(&msg.name)
        .bind(&msg.email)
        .bind(&msg.message)
        .bind(ts(&msg.created_at))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(msg)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactMessage>, RepoError> {
        let rows: Vec<DbContact> = sqlx::query_as(
            "SELECT id, name, email, message, created_at FROM contacts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter()
            .map(|r| -> Result<ContactMessage, RepoError> {
                Ok(ContactMessage {
                    id: Uuid::parse_str(&r.id).map_err(db_err)?,
                    name: r.name,
                    email: r.email,
                    message: r.message,
                    created_at: parse_ts(&r.created_at)?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl BlogRepository for SqliteRepo {
    async fn create_post(&self, post: BlogRecord) -> Result<BlogRecord, RepoError> {
        sqlx::query(
            "INSERT INTO blog_posts (id, title, content, image_url, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(ts(&post.created_at))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<BlogRecord>, RepoError> {
        let rows: Vec<DbBlogPost> = sqlx::query_as(
            "SELECT id, title, content, image_url, created_at FROM blog_posts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter()
            .map(|r| -> Result<BlogRecord, RepoError> {
                Ok(BlogRecord {
                    id: r.id,
                    title: r.title,
                    content: r.content,
                    image_url: r.image_url,
                    created_at: parse_ts(&r.created_at)?,
                })
            })
            .collect()
    }
}
