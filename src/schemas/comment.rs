use serde::{Deserialize, Serialize};

/// One comment as returned by the Pushshift comment search endpoint.
/// Fields not present in older archive entries default so a page never
/// fails to decode on a missing permalink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub body: String,
    pub created_utc: i64,
    pub id: String,
    #[serde(default)]
    pub score: i64,
    pub subreddit: String,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub link_id: Option<String>,
}

impl Comment {
    /// Site-relative permalink. Older archive entries lack the field, in
    /// which case it is reconstructed from the link id and comment id.
    pub fn permalink(&self) -> String {
        if let Some(permalink) = &self.permalink {
            return permalink.clone();
        }
        match &self.link_id {
            // link_id is fullname-prefixed, e.g. "t3_abc123"
            Some(link_id) => {
                let base = link_id.split('_').next_back().unwrap_or(link_id);
                format!("/comments/{}/_/{}", base, self.id)
            }
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment() -> Comment {
        Comment {
            author: "spez".to_string(),
            body: "hello".to_string(),
            created_utc: 1_500_000_000,
            id: "c1".to_string(),
            score: 1,
            subreddit: "rust".to_string(),
            permalink: None,
            link_id: None,
        }
    }

    #[test]
    fn test_permalink_prefers_provider_value() {
        let c = Comment {
            permalink: Some("/r/rust/comments/abc/_/c1/".to_string()),
            ..comment()
        };
        assert_eq!(c.permalink(), "/r/rust/comments/abc/_/c1/");
    }

    #[test]
    fn test_permalink_rebuilt_from_link_id() {
        let c = Comment {
            link_id: Some("t3_abc123".to_string()),
            ..comment()
        };
        assert_eq!(c.permalink(), "/comments/abc123/_/c1");
    }

    #[test]
    fn test_permalink_empty_without_link_id() {
        assert_eq!(comment().permalink(), "");
    }
}
