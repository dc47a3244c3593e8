//! Provider contract

use crate::diagnostics::Diagnostics;
use crate::resource::Resource;
use crate::schema::Schema;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Name and version a provider reports about itself
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProviderMetadata {
    /// Prefix of every resource type name (e.g. `pingdirectory`)
    pub type_name: String,
    pub version: String,
}

/// A provider: configuration plus the resource types it serves
#[async_trait]
pub trait Provider: Send + Sync {
    /// Data shared with every resource after configure
    type ProviderData: Send + Sync + 'static;

    /// Type name prefix and version
    fn metadata(&self) -> ProviderMetadata;

    /// Schema of the provider configuration block
    fn schema(&self) -> Schema;

    /// Build the shared provider data from the provider configuration
    async fn configure(&self, config: Value, diags: &mut Diagnostics) -> Option<Arc<Self::ProviderData>>;

    /// Fresh, unconfigured instances of every resource type
    fn resources(&self) -> Vec<Box<dyn Resource<ProviderData = Self::ProviderData>>>;
}
