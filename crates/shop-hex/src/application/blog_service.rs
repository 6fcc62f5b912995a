use chrono::Utc;
use shop_types::domain::blog::{BlogPost, BlogRecord};
use shop_types::ports::blog_repository::BlogRepository;
use uuid::Uuid;

use crate::errors::AppError;

pub struct BlogService<R: BlogRepository> {
    repo: R,
}

impl<R: BlogRepository> BlogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Newest first.
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let records = self.repo.list_posts().await?;
        Ok(records.into_iter().map(BlogPost::from).collect())
    }

    pub async fn publish(
        &self,
        title: &str,
        content: Option<String>,
        image_url: Option<String>,
    ) -> Result<BlogPost, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("title empty".into()));
        }
        let record = BlogRecord {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content,
            image_url,
            created_at: Utc::now(),
        };
        Ok(self.repo.create_post(record).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_repo::memory::InMemoryRepo;
    use shop_types::domain::blog::{BLOG_IMAGE_PLACEHOLDER, DEFAULT_READ_TIME};

    #[tokio::test]
    async fn publish_then_list_maps_posts() {
        let svc = BlogService::new(InMemoryRepo::new());
        svc.publish("Pertama", Some("a".repeat(300)), None)
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        svc.publish("Kedua", None, Some("/img/2.jpg".into()))
            .await
            .unwrap();

        let posts = svc.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Kedua");
        assert_eq!(posts[0].image, "/img/2.jpg");
        assert_eq!(posts[0].excerpt, "");
        assert_eq!(posts[1].image, BLOG_IMAGE_PLACEHOLDER);
        assert_eq!(posts[1].excerpt.len(), 153);
        assert_eq!(posts[1].read_time, DEFAULT_READ_TIME);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let svc = BlogService::new(InMemoryRepo::new());
        assert!(matches!(
            svc.publish("  ", None, None).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
