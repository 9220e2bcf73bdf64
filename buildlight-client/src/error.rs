//! Error types for the buildlight client

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while resolving a target or talking to the CI server
#[derive(Debug, Error)]
pub enum ClientError {
    /// No target with the requested name is configured
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// The targets file could not be read
    #[error("failed to read targets file {}: {source}", .path.display())]
    ConfigRead {
        /// Location that was tried
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The targets file could not be parsed
    #[error("failed to parse targets file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// The target's stored properties are unusable
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }
}
