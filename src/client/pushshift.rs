use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::client::QueryClient;
use crate::criteria::{Criteria, SearchTarget};
use crate::schemas::{Comment, Page, Post};

const PUSHSHIFT_BASE: &str = "https://api.pushshift.io/reddit/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pushshift wraps every result list in a `data` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

/// Query client backed by the public Pushshift API.
pub struct PushshiftClient {
    http: reqwest::Client,
    base: Url,
}

impl PushshiftClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pushsearch/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        let base = Url::parse(PUSHSHIFT_BASE).context("invalid pushshift base URL")?;
        Ok(Self { http, base })
    }

    /// Point the client at a different host, e.g. a local fixture server.
    pub fn with_base(base: Url) -> Result<Self> {
        if base.cannot_be_a_base() {
            bail!("base URL cannot be a base");
        }
        let mut client = Self::new()?;
        client.base = base;
        Ok(client)
    }
}

fn endpoint(target: SearchTarget) -> &'static str {
    match target {
        SearchTarget::Comments => "comment/search",
        SearchTarget::Posts => "submission/search",
    }
}

/// Build the search URL for one criteria snapshot. Unset filters are
/// omitted; time bounds are sent as epoch seconds, which Pushshift treats
/// as an exclusive `before` and inclusive `after`.
pub fn build_url(base: &Url, criteria: &Criteria) -> Result<Url> {
    let mut url = base
        .join(endpoint(criteria.target))
        .context("failed to build search URL")?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("html_decode", "true");
        pairs.append_pair("size", &criteria.result_size.to_string());
        if let Some(author) = &criteria.author {
            pairs.append_pair("author", author);
        }
        if let Some(subreddit) = &criteria.subreddit {
            pairs.append_pair("subreddit", subreddit);
        }
        if let Some(query_text) = &criteria.query_text {
            pairs.append_pair("q", query_text);
        }
        if let Some(score_filter) = &criteria.score_filter {
            // Provider-specific expression, passed through uninterpreted
            pairs.append_pair("score", score_filter);
        }
        if let Some(after) = criteria.after {
            pairs.append_pair("after", &after.timestamp().to_string());
        }
        if let Some(before) = criteria.before {
            pairs.append_pair("before", &before.timestamp().to_string());
        }
    }
    Ok(url)
}

impl QueryClient for PushshiftClient {
    fn query(&self, criteria: &Criteria) -> impl Future<Output = Result<Page>> + Send {
        let url = build_url(&self.base, criteria);
        let target = criteria.target;
        async move {
            let url = url?;
            debug!(%url, "querying pushshift");
            let response = self
                .http
                .get(url)
                .send()
                .await
                .context("request to pushshift failed")?;
            let status = response.status();
            if !status.is_success() {
                bail!("pushshift returned HTTP {status}");
            }
            match target {
                SearchTarget::Comments => {
                    let envelope: Envelope<Comment> = response
                        .json()
                        .await
                        .context("failed to decode comment results")?;
                    Ok(Page::Comments(envelope.data))
                }
                SearchTarget::Posts => {
                    let envelope: Envelope<Post> = response
                        .json()
                        .await
                        .context("failed to decode post results")?;
                    Ok(Page::Posts(envelope.data))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use std::collections::HashMap;

    fn params(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_default_criteria_url() {
        let base = Url::parse(PUSHSHIFT_BASE).unwrap();
        let url = build_url(&base, &Criteria::default()).unwrap();

        assert_eq!(url.path(), "/reddit/comment/search");
        let params = params(&url);
        assert_eq!(params.get("html_decode").map(String::as_str), Some("true"));
        assert_eq!(params.get("size").map(String::as_str), Some("100"));
        assert!(!params.contains_key("author"));
        assert!(!params.contains_key("before"));
    }

    #[test]
    fn test_posts_use_submission_endpoint() {
        let base = Url::parse(PUSHSHIFT_BASE).unwrap();
        let criteria = Criteria::default().with_target("Posts").unwrap();
        let url = build_url(&base, &criteria).unwrap();
        assert_eq!(url.path(), "/reddit/submission/search");
    }

    #[test]
    fn test_filters_and_bounds_are_included() {
        let base = Url::parse(PUSHSHIFT_BASE).unwrap();
        let before = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        let criteria = Criteria::default()
            .with_author("spez")
            .with_subreddit("rust")
            .with_query_text("borrow checker")
            .with_score_filter(">10 <100")
            .with_before(Some(before));
        let url = build_url(&base, &criteria).unwrap();

        let params = params(&url);
        assert_eq!(params.get("author").map(String::as_str), Some("spez"));
        assert_eq!(params.get("subreddit").map(String::as_str), Some("rust"));
        assert_eq!(params.get("q").map(String::as_str), Some("borrow checker"));
        assert_eq!(params.get("score").map(String::as_str), Some(">10 <100"));
        assert_eq!(
            params.get("before").map(String::as_str),
            Some(before.timestamp().to_string().as_str())
        );
        assert!(!params.contains_key("after"));
    }

    #[test]
    fn test_query_text_is_percent_encoded() {
        let base = Url::parse(PUSHSHIFT_BASE).unwrap();
        let criteria = Criteria::default().with_query_text("a&b c");
        let url = build_url(&base, &criteria).unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("q=a%26b+c") || query.contains("q=a%26b%20c"));
    }

    #[test]
    fn test_envelope_decodes_pushshift_payload() {
        let payload = r#"{
            "data": [
                {
                    "author": "spez",
                    "body": "hello world",
                    "created_utc": 1500000000,
                    "id": "c1",
                    "score": 42,
                    "subreddit": "rust",
                    "link_id": "t3_abc123"
                }
            ]
        }"#;
        let envelope: Envelope<Comment> = serde_json::from_str(payload).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].author, "spez");
        assert_eq!(envelope.data[0].permalink(), "/comments/abc123/_/c1");
    }
}
