pub mod commands;
pub mod controller;
pub mod events;
pub mod runner;


pub use commands::{Command, QueryJob};
pub use controller::{SessionController, SessionError, SessionState, Status};
pub use events::Message;
