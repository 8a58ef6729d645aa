//! Error types shared across newswatch crates

use thiserror::Error;

/// Workspace-wide error type
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl WatchError {
    pub fn parse(msg: impl Into<String>) -> Self {
        WatchError::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        WatchError::Config(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        WatchError::Storage(msg.into())
    }
}

/// Result type alias for newswatch operations
pub type WatchResult<T> = Result<T, WatchError>;
