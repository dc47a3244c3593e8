//! PingDirectory configuration API client
//!
//! Implements the configuration REST API for virtual attributes.
//! Based on the API structure: /config/virtual-attributes and /config/virtual-attributes/{name}

use crate::common::{object_path, HttpClient};
use crate::error::ConfigApiError;
use crate::models::*;
use crate::config_trait::ConfigApiClientTrait;
use reqwest::{Certificate, Client};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const VIRTUAL_ATTRIBUTES: &str = "virtual-attributes";

/// Settings used to build a [`ConfigApiClient`]
#[derive(Clone, Default)]
pub struct ClientSettings {
    /// Server base URL (e.g., "https://localhost:1443")
    pub base_url: String,
    /// Bind DN or username for basic authentication
    pub username: String,
    /// Password for basic authentication
    pub password: String,
    /// Accept any server certificate
    pub insecure_trust_all_tls: bool,
    /// Additional trusted CA certificates, PEM encoded
    pub ca_certificates_pem: Vec<Vec<u8>>,
    /// Value of the User-Agent header
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("insecure_trust_all_tls", &self.insecure_trust_all_tls)
            .field("ca_certificates_pem", &self.ca_certificates_pem.len())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Configuration API client
#[derive(Debug)]
pub struct ConfigApiClient {
    http: HttpClient,
}

impl ConfigApiClient {
    /// Create a new configuration API client
    ///
    /// # Arguments
    /// * `settings` - Server URL, credentials and TLS options
    pub fn new(settings: ClientSettings) -> Result<Self, ConfigApiError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(settings.insecure_trust_all_tls);

        if settings.insecure_trust_all_tls {
            warn!("TLS certificate verification is disabled for {}", settings.base_url);
        }

        for pem in &settings.ca_certificates_pem {
            let certificate = Certificate::from_pem(pem).map_err(|e| {
                ConfigApiError::Configuration(format!("invalid CA certificate PEM: {}", e))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder.build().map_err(ConfigApiError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, settings.base_url, settings.username, settings.password),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Fetch a virtual attribute and decode it, checking its configuration type first
    async fn get_virtual_attribute<T: for<'de> Deserialize<'de>>(
        &self,
        id: &str,
        expected_schema: &str,
    ) -> Result<T, ConfigApiError> {
        let value: serde_json::Value = self.http.get(&object_path(VIRTUAL_ATTRIBUTES, id)).await?;
        ensure_schema(id, &value, expected_schema)?;
        serde_json::from_value(value).map_err(ConfigApiError::Serialization)
    }

    async fn update_virtual_attribute<T: for<'de> Deserialize<'de>>(
        &self,
        id: &str,
        request: &UpdateRequest,
        expected_schema: &str,
    ) -> Result<T, ConfigApiError> {
        if request.operations.is_empty() {
            return Err(ConfigApiError::InvalidRequest(format!(
                "update of {} has no operations",
                id
            )));
        }
        debug!("Updating virtual attribute {} with {} operation(s)", id, request.operations.len());

        let value: serde_json::Value = self
            .http
            .patch(&object_path(VIRTUAL_ATTRIBUTES, id), request)
            .await?;
        ensure_schema(id, &value, expected_schema)?;
        serde_json::from_value(value).map_err(ConfigApiError::Serialization)
    }
}

/// Check that a config object carries the expected schema URN
pub(crate) fn ensure_schema(
    id: &str,
    value: &serde_json::Value,
    expected_schema: &str,
) -> Result<(), ConfigApiError> {
    let header: ConfigObjectHeader = serde_json::from_value(value.clone())?;
    if header.schemas.iter().any(|s| s == expected_schema) {
        Ok(())
    } else {
        Err(ConfigApiError::UnexpectedType {
            id: id.to_string(),
            expected: expected_schema.to_string(),
            found: header.schemas.join(", "),
        })
    }
}

#[async_trait::async_trait]
impl ConfigApiClientTrait for ConfigApiClient {
    fn base_url(&self) -> &str {
        ConfigApiClient::base_url(self)
    }

    async fn add_dn_join_virtual_attribute(
        &self,
        request: AddDnJoinVirtualAttributeRequest,
    ) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
        debug!("Creating DN Join virtual attribute {}", request.id);
        self.http.post(&format!("/{}", VIRTUAL_ATTRIBUTES), &request).await
    }

    async fn get_dn_join_virtual_attribute(
        &self,
        id: &str,
    ) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
        debug!("Fetching DN Join virtual attribute {}", id);
        self.get_virtual_attribute(id, DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA).await
    }

    async fn update_dn_join_virtual_attribute(
        &self,
        id: &str,
        request: UpdateRequest,
    ) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
        self.update_virtual_attribute(id, &request, DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA).await
    }

    async fn delete_dn_join_virtual_attribute(&self, id: &str) -> Result<(), ConfigApiError> {
        debug!("Deleting DN Join virtual attribute {}", id);
        self.http.delete(&object_path(VIRTUAL_ATTRIBUTES, id)).await
    }

    async fn add_num_subordinates_virtual_attribute(
        &self,
        request: AddNumSubordinatesVirtualAttributeRequest,
    ) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
        debug!("Creating Num Subordinates virtual attribute {}", request.id);
        self.http.post(&format!("/{}", VIRTUAL_ATTRIBUTES), &request).await
    }

    async fn get_num_subordinates_virtual_attribute(
        &self,
        id: &str,
    ) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
        debug!("Fetching Num Subordinates virtual attribute {}", id);
        self.get_virtual_attribute(id, NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA).await
    }

    async fn update_num_subordinates_virtual_attribute(
        &self,
        id: &str,
        request: UpdateRequest,
    ) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
        self.update_virtual_attribute(id, &request, NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA).await
    }

    async fn delete_num_subordinates_virtual_attribute(&self, id: &str) -> Result<(), ConfigApiError> {
        debug!("Deleting Num Subordinates virtual attribute {}", id);
        self.http.delete(&object_path(VIRTUAL_ATTRIBUTES, id)).await
    }
}
