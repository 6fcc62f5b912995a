use shop_types::domain::contact::ContactMessage;
use shop_types::ports::contact_repository::ContactRepository;

use crate::errors::AppError;

pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn submit(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactMessage, AppError> {
        let msg = ContactMessage::new(name, email, message)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let stored = self.repo.create_contact(msg).await?;
        tracing::info!(contact_id = %stored.id, "contact message received");
        Ok(stored)
    }

    pub async fn list(&self) -> Result<Vec<ContactMessage>, AppError> {
        Ok(self.repo.list_contacts().await?)
    }
}
