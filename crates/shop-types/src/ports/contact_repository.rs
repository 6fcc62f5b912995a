use async_trait::async_trait;

use crate::domain::contact::ContactMessage;
use crate::ports::RepoError;

#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    async fn create_contact(&self, msg: ContactMessage) -> Result<ContactMessage, RepoError>;
    async fn list_contacts(&self) -> Result<Vec<ContactMessage>, RepoError>;
}
