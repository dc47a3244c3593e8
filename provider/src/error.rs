//! Provider-specific error types.
//!
//! Resource operations never return these to the host directly; they are turned
//! into diagnostics at the resource boundary.

use pingdirectory_client::ConfigApiError;
use plugin_framework::Diagnostics;
use thiserror::Error;
use tracing::error;

/// Errors that can occur in the PingDirectory provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Configuration API error
    #[error("Configuration API error: {0}")]
    Client(#[from] ConfigApiError),

    /// Invalid provider configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An attribute value cannot be mapped onto the configuration API
    #[error("Invalid value for {attribute}: {message}")]
    InvalidValue {
        attribute: String,
        message: String,
    },

    /// Product version is well-formed but not supported
    #[error("Unsupported PingDirectory product version {version}, supported versions are: {supported}")]
    UnsupportedVersion {
        version: String,
        supported: String,
    },

    /// A configuration document could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Shorthand for [`ProviderError::InvalidValue`]
    pub fn invalid_value(attribute: &str, message: impl Into<String>) -> Self {
        ProviderError::InvalidValue { attribute: attribute.to_string(), message: message.into() }
    }
}

/// Record a provider error as an error diagnostic
pub fn add_provider_error(diags: &mut Diagnostics, summary: &str, err: &ProviderError) {
    error!("{}: {}", summary, err);
    match err {
        ProviderError::InvalidValue { attribute, .. } => {
            diags.add_attribute_error(attribute.as_str(), summary, err.to_string());
        }
        ProviderError::Client(client_err) => add_client_error(diags, summary, client_err),
        _ => diags.add_error(summary, err.to_string()),
    }
}

/// Record a configuration API failure as an error diagnostic, with the HTTP status when known
pub fn add_client_error(diags: &mut Diagnostics, summary: &str, err: &ConfigApiError) {
    error!("{}: {}", summary, err);
    let detail = match err.status() {
        Some(status) => format!("Error: {}\nHTTP status: {}", err, status),
        None => format!("Error: {}", err),
    };
    diags.add_error(summary, detail);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_detail_carries_status() {
        let mut diags = Diagnostics::new();
        add_client_error(
            &mut diags,
            "An error occurred while updating the Num Subordinates Virtual Attribute",
            &ConfigApiError::Api { status: 400, detail: "Invalid filter".to_string() },
        );
        let diagnostic = diags.errors().next().unwrap();
        assert!(diagnostic.detail.contains("Invalid filter"));
        assert!(diagnostic.detail.contains("HTTP status: 400"));
    }

    #[test]
    fn test_invalid_value_is_tied_to_attribute() {
        let mut diags = Diagnostics::new();
        add_provider_error(
            &mut diags,
            "Failed to create DN Join Virtual Attribute",
            &ProviderError::invalid_value("join_scope", "invalid value 'subtree'"),
        );
        assert_eq!(diags.errors().next().unwrap().attribute.as_deref(), Some("join_scope"));
    }
}
