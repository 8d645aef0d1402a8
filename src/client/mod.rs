pub mod pushshift;

pub use pushshift::PushshiftClient;

use anyhow::Result;
use std::future::Future;

use crate::criteria::Criteria;
use crate::schemas::Page;

/// Asynchronous query function turning a criteria snapshot into one page of
/// results, newest-first. Errors must carry a display message the session
/// can show; retry, backoff or rate limiting belong behind this boundary,
/// invisible to the controller.
pub trait QueryClient {
    fn query(&self, criteria: &Criteria) -> impl Future<Output = Result<Page>> + Send;
}
