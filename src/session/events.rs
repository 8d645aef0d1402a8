use chrono::{DateTime, Utc};

use crate::schemas::Page;

/// Everything the presentation layer (or a finished request) can tell the
/// session controller. Field-change events carry the raw input value;
/// validation happens inside the controller's update.
#[derive(Clone, Debug)]
pub enum Message {
    // Draft criteria edits
    AuthorChanged(String),
    SubredditChanged(String),
    SearchTargetChanged(String),
    ResultSizeChanged(String),
    ScoreFilterChanged(String),
    AfterChanged(Option<DateTime<Utc>>),
    BeforeChanged(Option<DateTime<Utc>>),
    QueryTextChanged(String),

    // User actions
    SearchRequested,
    MoreRequested,

    // Query responses, tagged with the generation that issued them
    SearchCompleted(u64, Page),
    SearchFailed(u64, String),
}
