pub mod client;
pub mod criteria;
pub mod formatters;
pub mod logging;
pub mod schemas;
pub mod session;

pub use client::{PushshiftClient, QueryClient};
pub use criteria::{Criteria, SearchTarget};
pub use schemas::{Comment, Page, Post};
pub use session::runner::{dispatch, execute};
pub use session::{Command, Message, QueryJob, SessionController, SessionError, SessionState, Status};
