//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Update or toggle targeted an id the store does not hold.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether this is the recoverable "no such task" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_))
    }
}
