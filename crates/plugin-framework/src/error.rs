//! Host errors
//!
//! Failures of the host transport itself. Failures of an operation are
//! diagnostics, not errors.

use thiserror::Error;

/// Errors raised while serving requests
#[derive(Debug, Error)]
pub enum HostError {
    /// Reading or writing the transport failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A request or response could not be encoded/decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request names a resource type the provider does not serve
    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    /// Resource operation requested before configure
    #[error("Provider is not configured")]
    NotConfigured,
}
