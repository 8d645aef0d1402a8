use anyhow::{Result, bail};
use chrono::{DateTime, Utc};

/// Which result shape a search produces. Exactly one is active per search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchTarget {
    Comments,
    Posts,
}

impl SearchTarget {
    /// Parse the label shown in the search-type selector.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "Comments" => Ok(SearchTarget::Comments),
            "Posts" => Ok(SearchTarget::Posts),
            other => bail!("{other} is not a valid search type"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchTarget::Comments => "Comments",
            SearchTarget::Posts => "Posts",
        }
    }
}

/// Immutable snapshot of all search parameters for one request.
///
/// Field updates return a new value instead of mutating in place, so a
/// snapshot handed to an in-flight request never observes later edits.
#[derive(Clone, Debug, PartialEq)]
pub struct Criteria {
    pub author: Option<String>,
    pub subreddit: Option<String>,
    pub target: SearchTarget,
    pub result_size: u32,
    pub score_filter: Option<String>,
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub query_text: Option<String>,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            author: None,
            subreddit: None,
            target: SearchTarget::Comments,
            result_size: 100,
            score_filter: None,
            after: None,
            before: None,
            query_text: None,
        }
    }
}

// Empty input means "unconstrained"
fn normalize(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

impl Criteria {
    pub fn with_author(&self, raw: &str) -> Self {
        Self {
            author: normalize(raw),
            ..self.clone()
        }
    }

    pub fn with_subreddit(&self, raw: &str) -> Self {
        Self {
            subreddit: normalize(raw),
            ..self.clone()
        }
    }

    /// Rejects unknown labels with a user-facing error; the draft is
    /// left untouched by the caller in that case.
    pub fn with_target(&self, raw: &str) -> Result<Self> {
        let target = SearchTarget::parse(raw)?;
        Ok(Self {
            target,
            ..self.clone()
        })
    }

    /// Unparsable or zero input retains the prior value. This is intentional
    /// permissiveness, not a validation error.
    pub fn with_result_size(&self, raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(size) if size > 0 => Self {
                result_size: size,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    pub fn with_score_filter(&self, raw: &str) -> Self {
        Self {
            score_filter: normalize(raw),
            ..self.clone()
        }
    }

    pub fn with_after(&self, bound: Option<DateTime<Utc>>) -> Self {
        Self {
            after: bound,
            ..self.clone()
        }
    }

    pub fn with_before(&self, bound: Option<DateTime<Utc>>) -> Self {
        Self {
            before: bound,
            ..self.clone()
        }
    }

    pub fn with_query_text(&self, raw: &str) -> Self {
        Self {
            query_text: normalize(raw),
            ..self.clone()
        }
    }
}
