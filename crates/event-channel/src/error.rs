//! Dispatch errors.

use thiserror::Error;

/// Failure reported by a subscriber; aborts the rest of the dispatch pass.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("subscriber rejected the event: {0}")]
    Rejected(String),

    #[error("subscriber failed")]
    Failed(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl DispatchError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
