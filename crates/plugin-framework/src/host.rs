//! JSON-lines host
//!
//! Serves one provider over any async reader/writer pair. Each input line is one
//! [`HostRequest`]; each output line is the matching [`HostResponse`]. Requests are
//! handled strictly one at a time.

use crate::diagnostics::Diagnostics;
use crate::error::HostError;
use crate::provider::{Provider, ProviderMetadata};
use crate::resource::{Plan, ReadResult, Resource, State};
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// A request from the host
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum HostRequest {
    Schema,
    Configure { config: Value },
    Validate { type_name: String, config: Value },
    Create { type_name: String, plan: Value },
    Read { type_name: String, state: Value },
    Update { type_name: String, plan: Value, state: Value },
    Delete { type_name: String, state: Value },
    Import { type_name: String, id: String },
}

/// Every schema a provider serves
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDocument {
    pub provider: ProviderMetadata,
    pub provider_schema: Schema,
    pub resource_schemas: BTreeMap<String, Schema>,
}

/// The answer to one request
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<SchemaDocument>,
    /// New state; null when the operation produced none
    pub state: Option<Value>,
    /// Read found the object gone
    pub removed: bool,
    pub diagnostics: Diagnostics,
}

impl HostResponse {
    fn from_diagnostics(diagnostics: Diagnostics) -> Self {
        Self { diagnostics, ..Default::default() }
    }

    fn error(summary: &str, detail: impl Into<String>) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_error(summary, detail);
        Self::from_diagnostics(diagnostics)
    }

    fn with_state(state: Option<State>, diagnostics: Diagnostics) -> Self {
        Self {
            state: state.map(State::into_raw),
            diagnostics,
            ..Default::default()
        }
    }
}

type DynResource<P> = Box<dyn Resource<ProviderData = <P as Provider>::ProviderData>>;

/// Dispatches requests to a provider and its resources
pub struct ProviderHost<P: Provider> {
    provider: P,
    resources: BTreeMap<String, DynResource<P>>,
    configured: bool,
}

impl<P: Provider> fmt::Debug for ProviderHost<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHost")
            .field("provider", &self.provider.metadata())
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("configured", &self.configured)
            .finish()
    }
}

impl<P: Provider> ProviderHost<P> {
    /// Register every resource type of `provider` under its full type name
    pub fn new(provider: P) -> Self {
        let prefix = provider.metadata().type_name;
        let resources = provider
            .resources()
            .into_iter()
            .map(|resource| (resource.metadata(&prefix), resource))
            .collect();
        Self { provider, resources, configured: false }
    }

    /// Names of every served resource type
    pub fn resource_type_names(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    /// Provider and resource schemas
    pub fn schemas(&self) -> SchemaDocument {
        SchemaDocument {
            provider: self.provider.metadata(),
            provider_schema: self.provider.schema(),
            resource_schemas: self
                .resources
                .iter()
                .map(|(name, resource)| (name.clone(), resource.schema()))
                .collect(),
        }
    }

    fn resource(&self, type_name: &str) -> Result<&DynResource<P>, HostError> {
        self.resources
            .get(type_name)
            .ok_or_else(|| HostError::UnknownResourceType(type_name.to_string()))
    }

    fn configured_resource(&self, type_name: &str) -> Result<&DynResource<P>, HostError> {
        if !self.configured {
            return Err(HostError::NotConfigured);
        }
        self.resource(type_name)
    }

    /// Handle a single request
    pub async fn handle(&mut self, request: HostRequest) -> HostResponse {
        match request {
            HostRequest::Schema => HostResponse {
                schemas: Some(self.schemas()),
                ..Default::default()
            },
            HostRequest::Configure { config } => self.configure(config).await,
            HostRequest::Validate { type_name, config } => {
                let mut diags = Diagnostics::new();
                match self.resource(&type_name) {
                    Ok(resource) => resource.validate(&config, &mut diags),
                    Err(e) => return HostResponse::error("Invalid request", e.to_string()),
                }
                HostResponse::from_diagnostics(diags)
            }
            HostRequest::Create { type_name, plan } => {
                let resource = match self.configured_resource(&type_name) {
                    Ok(resource) => resource,
                    Err(e) => return HostResponse::error("Invalid request", e.to_string()),
                };
                let mut diags = Diagnostics::new();
                let state = resource.create(Plan::new(plan), &mut diags).await;
                HostResponse::with_state(state, diags)
            }
            HostRequest::Read { type_name, state } => {
                let resource = match self.configured_resource(&type_name) {
                    Ok(resource) => resource,
                    Err(e) => return HostResponse::error("Invalid request", e.to_string()),
                };
                let mut diags = Diagnostics::new();
                match resource.read(State::new(state), &mut diags).await {
                    Some(ReadResult::Present(state)) => HostResponse::with_state(Some(state), diags),
                    Some(ReadResult::Removed) => HostResponse {
                        removed: true,
                        diagnostics: diags,
                        ..Default::default()
                    },
                    None => HostResponse::from_diagnostics(diags),
                }
            }
            HostRequest::Update { type_name, plan, state } => {
                let resource = match self.configured_resource(&type_name) {
                    Ok(resource) => resource,
                    Err(e) => return HostResponse::error("Invalid request", e.to_string()),
                };
                let mut diags = Diagnostics::new();
                let state = resource.update(Plan::new(plan), State::new(state), &mut diags).await;
                HostResponse::with_state(state, diags)
            }
            HostRequest::Delete { type_name, state } => {
                let resource = match self.configured_resource(&type_name) {
                    Ok(resource) => resource,
                    Err(e) => return HostResponse::error("Invalid request", e.to_string()),
                };
                let mut diags = Diagnostics::new();
                resource.delete(State::new(state), &mut diags).await;
                HostResponse::from_diagnostics(diags)
            }
            HostRequest::Import { type_name, id } => {
                let resource = match self.configured_resource(&type_name) {
                    Ok(resource) => resource,
                    Err(e) => return HostResponse::error("Invalid request", e.to_string()),
                };
                let mut diags = Diagnostics::new();
                let Some(imported) = resource.import_state(&id, &mut diags) else {
                    return HostResponse::from_diagnostics(diags);
                };
                match resource.read(imported, &mut diags).await {
                    Some(ReadResult::Present(state)) => HostResponse::with_state(Some(state), diags),
                    Some(ReadResult::Removed) => {
                        diags.add_error(
                            "Cannot import non-existent remote object",
                            format!("No {} with identifier '{}' exists", type_name, id),
                        );
                        HostResponse::from_diagnostics(diags)
                    }
                    None => HostResponse::from_diagnostics(diags),
                }
            }
        }
    }

    async fn configure(&mut self, config: Value) -> HostResponse {
        let mut diags = Diagnostics::new();
        let Some(data) = self.provider.configure(config, &mut diags).await else {
            if !diags.has_error() {
                diags.add_error("Provider configuration failed", "no provider data was produced");
            }
            return HostResponse::from_diagnostics(diags);
        };

        for resource in self.resources.values_mut() {
            resource.configure(Arc::clone(&data));
        }
        self.configured = true;
        info!("Provider configured with {} resource type(s)", self.resources.len());
        HostResponse::from_diagnostics(diags)
    }

    /// Serve newline-delimited JSON requests until the reader is exhausted
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<(), HostError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = BufReader::new(reader).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<HostRequest>(&line) {
                Ok(request) => {
                    debug!("Handling request: {:?}", request);
                    self.handle(request).await
                }
                Err(e) => {
                    warn!("Malformed request: {}", e);
                    HostResponse::error("Malformed request", e.to_string())
                }
            };

            let mut encoded = serde_json::to_vec(&response)?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
        }

        Ok(())
    }
}
