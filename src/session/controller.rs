use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::criteria::Criteria;
use crate::schemas::Page;
use crate::session::commands::{Command, QueryJob};
use crate::session::events::Message;

/// Where the session currently is in its request cycle. Failures return to
/// `Idle` with `last_error` set, so the user can always retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Searching,
    LoadingMore,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionError {
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Mutable session aggregate, touched only by `SessionController::update`.
pub struct SessionState {
    /// Snapshot used for the most recent request. Continuation requests
    /// reuse all of its filters except the `before` bound.
    pub last_issued: Option<Criteria>,
    /// Accumulated results, tagged by the target that produced them.
    /// `None` until the first search completes.
    pub results: Option<Page>,
    pub status: Status,
    pub last_error: Option<SessionError>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            last_issued: None,
            results: None,
            status: Status::Idle,
            last_error: None,
        }
    }

    fn set_error(&mut self, message: String) {
        self.last_error = Some(SessionError {
            message,
            at: Utc::now(),
        });
    }
}

/// Owns the draft criteria and the session state, and decides when to issue
/// fresh vs. continuation queries. `update` is the only state-transition
/// entry point; it is synchronous and returns the side effect to run.
pub struct SessionController {
    draft: Criteria,
    state: SessionState,
    generation: u64,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            draft: Criteria::default(),
            state: SessionState::new(),
            generation: 0,
        }
    }

    pub fn draft(&self) -> &Criteria {
        &self.draft
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Generation of the most recently issued request. Responses carry the
    /// generation they were issued with, so a stale one can be recognized.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the presentation layer should offer "more results".
    pub fn can_load_more(&self) -> bool {
        self.state.status == Status::Idle
            && self.state.results.as_ref().is_some_and(|page| !page.is_empty())
    }

    pub fn update(&mut self, msg: Message) -> Command {
        match msg {
            Message::AuthorChanged(raw) => {
                self.draft = self.draft.with_author(&raw);
                Command::None
            }
            Message::SubredditChanged(raw) => {
                self.draft = self.draft.with_subreddit(&raw);
                Command::None
            }
            Message::SearchTargetChanged(raw) => {
                match self.draft.with_target(&raw) {
                    Ok(draft) => self.draft = draft,
                    // Invalid label: draft unchanged, surfaced to the user
                    Err(e) => self.state.set_error(e.to_string()),
                }
                Command::None
            }
            Message::ResultSizeChanged(raw) => {
                self.draft = self.draft.with_result_size(&raw);
                Command::None
            }
            Message::ScoreFilterChanged(raw) => {
                self.draft = self.draft.with_score_filter(&raw);
                Command::None
            }
            Message::AfterChanged(bound) => {
                self.draft = self.draft.with_after(bound);
                Command::None
            }
            Message::BeforeChanged(bound) => {
                self.draft = self.draft.with_before(bound);
                Command::None
            }
            Message::QueryTextChanged(raw) => {
                self.draft = self.draft.with_query_text(&raw);
                Command::None
            }
            Message::SearchRequested => {
                self.state.last_error = None;
                self.state.results = None;
                self.state.status = Status::Searching;
                self.generation += 1;
                let snapshot = self.draft.clone();
                self.state.last_issued = Some(snapshot.clone());
                Command::ExecuteSearch(QueryJob {
                    generation: self.generation,
                    criteria: snapshot,
                })
            }
            Message::MoreRequested => {
                // No results yet: nothing to continue from
                let Some(cursor) = self
                    .state
                    .results
                    .as_ref()
                    .and_then(|page| page.last_created_utc())
                else {
                    return Command::None;
                };
                let Some(before) = DateTime::from_timestamp(cursor, 0) else {
                    return Command::None;
                };
                let base = match &self.state.last_issued {
                    Some(criteria) => criteria.clone(),
                    None => self.draft.clone(),
                };
                self.state.last_error = None;
                self.state.status = Status::LoadingMore;
                self.generation += 1;
                let continuation = base.with_before(Some(before));
                self.state.last_issued = Some(continuation.clone());
                Command::ExecuteSearch(QueryJob {
                    generation: self.generation,
                    criteria: continuation,
                })
            }
            Message::SearchCompleted(generation, page) => {
                if generation != self.generation {
                    // Overlapping requests race; whichever response lands
                    // last wins. Kept observable behavior, logged for
                    // diagnosis.
                    debug!(
                        response = generation,
                        current = self.generation,
                        "applying out-of-generation search response"
                    );
                }
                match self.state.status {
                    Status::LoadingMore => match &mut self.state.results {
                        Some(existing) => existing.append(page),
                        None => self.state.results = Some(page),
                    },
                    _ => self.state.results = Some(page),
                }
                self.state.status = Status::Idle;
                Command::None
            }
            Message::SearchFailed(generation, message) => {
                error!(generation, %message, "search request failed");
                self.state.set_error(message);
                self.state.status = Status::Idle;
                Command::None
            }
        }
    }
}
