pub mod comment;
pub mod post;

pub use comment::Comment;
pub use post::Post;

use crate::criteria::SearchTarget;

/// One batch of result items returned by a single query, newest-first.
/// A page is homogeneous: it holds comments or posts, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Comments(Vec<Comment>),
    Posts(Vec<Post>),
}

impl Page {
    pub fn empty(target: SearchTarget) -> Self {
        match target {
            SearchTarget::Comments => Page::Comments(Vec::new()),
            SearchTarget::Posts => Page::Posts(Vec::new()),
        }
    }

    pub fn target(&self) -> SearchTarget {
        match self {
            Page::Comments(_) => SearchTarget::Comments,
            Page::Posts(_) => SearchTarget::Posts,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Page::Comments(items) => items.len(),
            Page::Posts(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamp of the last (oldest, in newest-first order) item. This is
    /// the continuation cursor for a "more results" request.
    pub fn last_created_utc(&self) -> Option<i64> {
        match self {
            Page::Comments(items) => items.last().map(|c| c.created_utc),
            Page::Posts(items) => items.last().map(|p| p.created_utc),
        }
    }

    /// Append another page in order, existing items first. A page of the
    /// other shape replaces this one wholesale; mixed-shape sequences are
    /// never observable.
    pub fn append(&mut self, other: Page) {
        match (self, other) {
            (Page::Comments(items), Page::Comments(more)) => items.extend(more),
            (Page::Posts(items), Page::Posts(more)) => items.extend(more),
            (this, other) => *this = other,
        }
    }
}
