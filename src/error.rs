//! Engine error taxonomy
//!
//! Nothing here is fatal to a run. Callers either propagate these from
//! loaders or log them and degrade (empty pool, unsaved score).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Word list missing, unreadable or empty
    #[error("word pool unavailable: {0}")]
    PoolUnavailable(String),

    /// Score collaborator rejected or never received the run
    #[error("score submission failed: {0}")]
    SubmissionFailed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
