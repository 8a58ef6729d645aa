//! Error types for the news module

use thiserror::Error;

/// Errors that can occur while fetching feeds or delivering alerts
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed (includes timeouts)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Failed to parse a feed or API response
    #[error("Parse error: {0}")]
    ParseError(String),
}
