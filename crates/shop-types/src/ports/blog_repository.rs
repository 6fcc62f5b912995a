use async_trait::async_trait;

use crate::domain::blog::BlogRecord;
use crate::ports::RepoError;

#[async_trait]
pub trait BlogRepository: Send + Sync + 'static {
    async fn create_post(&self, post: BlogRecord) -> Result<BlogRecord, RepoError>;
    /// Newest first by `created_at`.
    async fn list_posts(&self) -> Result<Vec<BlogRecord>, RepoError>;
}
