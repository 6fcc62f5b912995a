use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const BLOG_IMAGE_PLACEHOLDER: &str = "/api/placeholder/600/400";
pub const EXCERPT_CHARS: usize = 150;
pub const DEFAULT_READ_TIME: &str = "5 min read";

/// Row as stored in `blog_posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogRecord {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub date: DateTime<Utc>,
    pub read_time: String,
}

impl From<BlogRecord> for BlogPost {
    fn from(r: BlogRecord) -> Self {
        let content = r.content.unwrap_or_default();
        Self {
            id: r.id,
            title: r.title,
            excerpt: excerpt(&content),
            content,
            image: r
                .image_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| BLOG_IMAGE_PLACEHOLDER.to_string()),
            date: r.created_at,
            read_time: DEFAULT_READ_TIME.to_string(),
        }
    }
}

/// First [`EXCERPT_CHARS`] characters followed by an ellipsis.
pub fn excerpt(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let head: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_cuts_on_char_boundary() {
        let long = "é".repeat(200);
        let ex = excerpt(&long);
        assert_eq!(ex.chars().count(), EXCERPT_CHARS + 3);
        assert!(ex.ends_with("..."));
        assert_eq!(excerpt("short"), "short...");
        assert_eq!(excerpt(""), "");
    }

    #[test]
    fn record_conversion_applies_defaults() {
        let now = Utc::now();
        let post = BlogPost::from(BlogRecord {
            id: "b1".into(),
            title: "Kenapa Bambu?".into(),
            content: None,
            image_url: None,
            created_at: now,
        });
        assert_eq!(post.excerpt, "");
        assert_eq!(post.content, "");
        assert_eq!(post.image, BLOG_IMAGE_PLACEHOLDER);
        assert_eq!(post.read_time, DEFAULT_READ_TIME);
        assert_eq!(post.date, now);
    }
}
