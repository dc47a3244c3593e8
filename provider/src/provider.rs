//! PingDirectory provider
//!
//! Resolves the provider configuration, builds the shared configuration API
//! client and registers every resource type.

use crate::config::{provider_schema, ProviderConfig};
use crate::error::{add_provider_error, ProviderError};
use crate::resource::virtual_attribute::{DnJoinVirtualAttribute, NumSubordinatesVirtualAttribute};
use crate::resource::ConfigResource;
use crate::version::ProductVersion;
use async_trait::async_trait;
use pingdirectory_client::{ConfigApiClient, ConfigApiClientTrait};
use plugin_framework::{Diagnostics, Provider, ProviderMetadata, Resource, Schema};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Resource type name prefix
pub const PROVIDER_TYPE_NAME: &str = "pingdirectory";

/// Data shared with every resource after configure
pub struct ProviderData {
    pub client: Arc<dyn ConfigApiClientTrait>,
    pub product_version: ProductVersion,
}

impl fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderData")
            .field("base_url", &self.client.base_url())
            .field("product_version", &self.product_version)
            .finish()
    }
}

/// The PingDirectory provider
#[derive(Debug, Clone)]
pub struct PingDirectoryProvider {
    version: String,
}

impl PingDirectoryProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self { version: version.into() }
    }

    fn user_agent(&self) -> String {
        format!("terraform-provider-{}/{}", PROVIDER_TYPE_NAME, self.version)
    }

    fn build_data(&self, config: &ProviderConfig) -> Result<ProviderData, ProviderError> {
        let client = ConfigApiClient::new(config.client_settings(&self.user_agent())?)?;
        Ok(ProviderData { client: Arc::new(client), product_version: config.product_version })
    }
}

#[async_trait]
impl Provider for PingDirectoryProvider {
    type ProviderData = ProviderData;

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata { type_name: PROVIDER_TYPE_NAME.to_string(), version: self.version.clone() }
    }

    fn schema(&self) -> Schema {
        provider_schema()
    }

    async fn configure(&self, config: Value, diags: &mut Diagnostics) -> Option<Arc<ProviderData>> {
        let resolved = match ProviderConfig::from_config(&config) {
            Ok(resolved) => resolved,
            Err(e) => {
                add_provider_error(diags, "Invalid provider configuration", &e);
                return None;
            }
        };

        info!("Configuring PingDirectory provider:");
        info!("  HTTPS host: {}", resolved.https_host);
        info!("  Username: {}", resolved.username);
        info!("  Product version: {}", resolved.product_version);

        match self.build_data(&resolved) {
            Ok(data) => Some(Arc::new(data)),
            Err(e) => {
                add_provider_error(diags, "Unable to create PingDirectory client", &e);
                None
            }
        }
    }

    fn resources(&self) -> Vec<Box<dyn Resource<ProviderData = ProviderData>>> {
        vec![
            Box::new(ConfigResource::<DnJoinVirtualAttribute>::managed()),
            Box::new(ConfigResource::<DnJoinVirtualAttribute>::edit_only()),
            Box::new(ConfigResource::<NumSubordinatesVirtualAttribute>::managed()),
            Box::new(ConfigResource::<NumSubordinatesVirtualAttribute>::edit_only()),
        ]
    }
}
