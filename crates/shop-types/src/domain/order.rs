use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::cart::CartLine;
use crate::domain::pricing::{PriceSummary, PricingRules};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            other => anyhow::bail!("unknown order status: {other}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Bank transfer.
    #[default]
    Transfer,
    /// Cash on delivery.
    Cod,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Cod => "cod",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transfer" => Ok(PaymentMethod::Transfer),
            "cod" => Ok(PaymentMethod::Cod),
            other => anyhow::bail!("unknown payment method: {other}"),
        }
    }
}

/// Contact, shipping and payment fields collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerDetails {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: u64,
    pub subtotal: u64,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id.clone(),
            product_name: line.product.name.clone(),
            quantity: line.quantity,
            price: line.product.price,
            subtotal: line.subtotal(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderItem>,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub discount: u64,
    pub total: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Builds a pending order from a snapshot of cart lines.
    pub fn new(
        details: CustomerDetails,
        lines: &[CartLine],
        rules: &PricingRules,
    ) -> anyhow::Result<Self> {
        let customer_name = details.customer_name.trim().to_string();
        let email = details.email.trim().to_string();
        let phone = details.phone.trim().to_string();
        let address = details.address.trim().to_string();

        if customer_name.is_empty() {
            anyhow::bail!("customer_name empty");
        }
        if !email.contains('@') {
            anyhow::bail!("invalid email");
        }
        if phone.is_empty() {
            anyhow::bail!("phone empty");
        }
        if address.is_empty() {
            anyhow::bail!("address empty");
        }
        if lines.is_empty() {
            anyhow::bail!("cart is empty");
        }
        for line in lines {
            if line.quantity == 0 {
                anyhow::bail!("item qty must be > 0");
            }
        }

        let items: Vec<OrderItem> = lines.iter().map(OrderItem::from).collect();
        let subtotal = items
            .iter()
            .fold(0u64, |acc, it| acc.saturating_add(it.subtotal));
        let summary = rules.summarize(subtotal);
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            customer_name,
            email,
            phone,
            address,
            city: non_blank(details.city),
            postal_code: non_blank(details.postal_code),
            payment_method: details.payment_method,
            items,
            subtotal: summary.subtotal,
            shipping_cost: summary.shipping_cost,
            discount: summary.discount,
            total: summary.total,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> PriceSummary {
        PriceSummary {
            subtotal: self.subtotal,
            shipping_cost: self.shipping_cost,
            discount: self.discount,
            total: self.total,
        }
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
