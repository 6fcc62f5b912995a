use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: &str, email: &str, message: &str) -> anyhow::Result<Self> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        let message = message.trim();
        if name.is_empty() {
            anyhow::bail!("name empty");
        }
        if !email.contains('@') {
            anyhow::bail!("invalid email");
        }
        if message.is_empty() {
            anyhow::bail!("message empty");
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email,
            message: message.to_string(),
            created_at: Utc::now(),
        })
    }
}
