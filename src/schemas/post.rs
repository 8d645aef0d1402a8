use serde::{Deserialize, Serialize};

/// One submission as returned by the Pushshift submission search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub author: String,
    pub created_utc: i64,
    pub id: String,
    #[serde(default)]
    pub score: i64,
    pub subreddit: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub permalink: Option<String>,
}

impl Post {
    /// Thumbnail to display, if any. Pushshift uses placeholder words
    /// ("self", "default") for posts without a real thumbnail; in that case
    /// fall back to the post URL when it points at an image.
    pub fn thumbnail_url(&self) -> Option<&str> {
        if self.thumbnail.starts_with("http") {
            return Some(&self.thumbnail);
        }
        let ext = self.url.rsplit('.').next().unwrap_or("");
        if ext == "png" || ext == "jpg" {
            Some(&self.url)
        } else {
            None
        }
    }

    /// Text body for self posts, link URL otherwise.
    pub fn body(&self) -> &str {
        if self.selftext.is_empty() {
            &self.url
        } else {
            &self.selftext
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            author: "spez".to_string(),
            created_utc: 1_500_000_000,
            id: "p1".to_string(),
            score: 10,
            subreddit: "rust".to_string(),
            title: "A post".to_string(),
            selftext: String::new(),
            url: "https://example.com/page".to_string(),
            thumbnail: "self".to_string(),
            permalink: None,
        }
    }

    #[test]
    fn test_thumbnail_direct() {
        let p = Post {
            thumbnail: "https://thumbs.example.com/t.png".to_string(),
            ..post()
        };
        assert_eq!(p.thumbnail_url(), Some("https://thumbs.example.com/t.png"));
    }

    #[test]
    fn test_thumbnail_falls_back_to_image_url() {
        let p = Post {
            url: "https://i.example.com/pic.jpg".to_string(),
            ..post()
        };
        assert_eq!(p.thumbnail_url(), Some("https://i.example.com/pic.jpg"));
    }

    #[test]
    fn test_no_thumbnail_for_plain_links() {
        assert_eq!(post().thumbnail_url(), None);
    }

    #[test]
    fn test_body_prefers_selftext() {
        let p = Post {
            selftext: "text body".to_string(),
            ..post()
        };
        assert_eq!(p.body(), "text body");
        assert_eq!(post().body(), "https://example.com/page");
    }
}
