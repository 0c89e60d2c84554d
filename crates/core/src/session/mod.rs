//! Browsing session: state, retrievals and criteria debouncing.

mod config;
mod debounce;
mod orchestrator;
mod state;

pub use config::SessionConfig;
pub use debounce::CriteriaDebouncer;
pub use orchestrator::{PoemView, SearchOrchestrator};
pub use state::{RetrievalTicket, SessionSnapshot, SessionState};

use thiserror::Error;

/// Errors from operations addressing the current result set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Poem index {index} out of range (results: {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
