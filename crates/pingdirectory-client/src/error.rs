//! Configuration API client errors

use thiserror::Error;

/// Errors that can occur when interacting with the PingDirectory configuration API
#[derive(Debug, Error)]
pub enum ConfigApiError {
    /// HTTP transport error (connection refused, TLS failure, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configuration API answered with a non-success status
    #[error("Configuration API error: {status} - {detail}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `detail` from the API error body, or the raw body when it is not JSON
        detail: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config object not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The object exists but is of a different configuration type
    #[error("Unexpected configuration type for {id}: expected {expected}, found {found}")]
    UnexpectedType {
        /// Object identifier
        id: String,
        /// Schema URN the caller asked for
        expected: String,
        /// Schema URNs reported by the server
        found: String,
    },

    /// Invalid request (e.g., malformed operation)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client could not be built from the supplied settings
    #[error("Client configuration error: {0}")]
    Configuration(String),
}

impl ConfigApiError {
    /// HTTP status carried by this error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ConfigApiError::Api { status, .. } => Some(*status),
            ConfigApiError::NotFound(_) => Some(404),
            ConfigApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the object does not exist on the server
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
