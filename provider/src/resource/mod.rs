//! Resource implementations
//!
//! Every configuration object type implements [`ConfigObject`]: its model, its
//! field table and the client calls for its REST endpoints. [`ConfigResource`]
//! turns any `ConfigObject` into a host resource, either managed (created and
//! deleted by the provider) or edit-only (adopted from an object that already
//! exists, and forgotten on delete).

pub mod mapping;
pub mod virtual_attribute;

use crate::error::{add_client_error, add_provider_error, ProviderError};
use crate::operations::{diff_operations, resolve_unknowns, schema_from_fields, Field};
use crate::provider::ProviderData;
use async_trait::async_trait;
use pingdirectory_client::{ConfigApiClientTrait, ConfigApiError, ConfigMessages, Operation, UpdateRequest};
use plugin_framework::{AttrValue, Diagnostics, Plan, ReadResult, Resource, Schema, State};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A configuration object type and its REST endpoints
#[async_trait]
pub trait ConfigObject: Clone + Default + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Body of the add (POST) request
    type AddRequest: Serialize + Send;
    /// Object as returned by the server
    type Response: Send + Sync;

    /// Resource type noun, e.g. `dn_join_virtual_attribute`
    const NOUN: &'static str;
    /// Human readable type name, e.g. `DN Join Virtual Attribute`
    const DISPLAY_NAME: &'static str;

    /// Field table, in schema and patch order
    fn fields() -> Vec<Field<Self>>;

    fn id(&self) -> &AttrValue<String>;

    /// Build the add request; fails on values the API cannot accept
    fn add_request(&self) -> Result<Self::AddRequest, ProviderError>;

    /// Model from a server response
    ///
    /// `expected` is the plan or prior state, used where the local value is authoritative.
    fn from_response(response: &Self::Response, expected: Option<&Self>) -> Self;

    /// Notifications and required actions carried by a response
    fn messages(response: &Self::Response) -> Option<&ConfigMessages>;

    async fn add(client: &dyn ConfigApiClientTrait, request: Self::AddRequest) -> Result<Self::Response, ConfigApiError>;
    async fn get(client: &dyn ConfigApiClientTrait, id: &str) -> Result<Self::Response, ConfigApiError>;
    async fn update(client: &dyn ConfigApiClientTrait, id: &str, request: UpdateRequest) -> Result<Self::Response, ConfigApiError>;
    async fn delete(client: &dyn ConfigApiClientTrait, id: &str) -> Result<(), ConfigApiError>;
}

/// Log the notifications and required actions of a response
pub fn log_messages(messages: Option<&ConfigMessages>) {
    let Some(messages) = messages else {
        return;
    };
    for notification in &messages.notifications {
        warn!("Configuration API Notification: {}", notification);
    }
    for action in &messages.required_actions {
        warn!("Configuration API Required Action: {}", action);
    }
}

/// Host resource over one configuration object type
pub struct ConfigResource<T> {
    edit_only: bool,
    data: Option<Arc<ProviderData>>,
    _object: PhantomData<fn() -> T>,
}

impl<T: ConfigObject> fmt::Debug for ConfigResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResource")
            .field("type", &T::NOUN)
            .field("edit_only", &self.edit_only)
            .field("configured", &self.data.is_some())
            .finish()
    }
}

impl<T: ConfigObject> ConfigResource<T> {
    /// Resource the provider creates and deletes
    pub fn managed() -> Self {
        Self { edit_only: false, data: None, _object: PhantomData }
    }

    /// Resource over an object that always exists; delete only forgets it
    pub fn edit_only() -> Self {
        Self { edit_only: true, data: None, _object: PhantomData }
    }

    fn client(&self, diags: &mut Diagnostics) -> Option<Arc<dyn ConfigApiClientTrait>> {
        match &self.data {
            Some(data) => Some(Arc::clone(&data.client)),
            None => {
                diags.add_error(
                    "Unconfigured resource",
                    format!("The {} resource was used before the provider was configured", T::DISPLAY_NAME),
                );
                None
            }
        }
    }

    fn identifier(model: &T, diags: &mut Diagnostics) -> Option<String> {
        match model.id().non_empty() {
            Some(id) => Some(id.to_string()),
            None => {
                diags.add_attribute_error(
                    "id",
                    "Missing identifier",
                    format!("A known, non-empty id is required for a {}", T::DISPLAY_NAME),
                );
                None
            }
        }
    }

    fn to_state(&self, response: &T::Response, expected: Option<&T>, diags: &mut Diagnostics) -> Option<State> {
        log_messages(T::messages(response));
        let model = T::from_response(response, expected);
        State::from_model(&model, diags)
    }

    async fn add(&self, client: &dyn ConfigApiClientTrait, plan: &T, diags: &mut Diagnostics) -> Option<T::Response> {
        let request = match plan.add_request() {
            Ok(request) => request,
            Err(e) => {
                add_provider_error(diags, &format!("Failed to create {}", T::DISPLAY_NAME), &e);
                return None;
            }
        };
        if let Ok(body) = serde_json::to_string(&request) {
            debug!("Add request: {}", body);
        }

        match T::add(client, request).await {
            Ok(response) => {
                info!("Created {} {}", T::DISPLAY_NAME, plan.id().non_empty().unwrap_or_default());
                Some(response)
            }
            Err(e) => {
                add_client_error(diags, &format!("An error occurred while creating the {}", T::DISPLAY_NAME), &e);
                None
            }
        }
    }

    /// Read the existing object and patch it to match the plan
    async fn adopt(&self, client: &dyn ConfigApiClientTrait, plan: &T, diags: &mut Diagnostics) -> Option<T::Response> {
        let id = Self::identifier(plan, diags)?;
        let existing = match T::get(client, &id).await {
            Ok(existing) => existing,
            Err(e) => {
                add_client_error(diags, &format!("An error occurred while getting the {}", T::DISPLAY_NAME), &e);
                return None;
            }
        };

        let current = T::from_response(&existing, Some(plan));
        let operations = diff_operations(&T::fields(), plan, &current);
        if operations.is_empty() {
            info!("Existing {} {} already matches the plan", T::DISPLAY_NAME, id);
            return Some(existing);
        }
        self.patch(client, &id, operations, diags).await
    }

    async fn patch(
        &self,
        client: &dyn ConfigApiClientTrait,
        id: &str,
        operations: Vec<Operation>,
        diags: &mut Diagnostics,
    ) -> Option<T::Response> {
        debug!("Update operations for {} {}: {:?}", T::DISPLAY_NAME, id, operations);
        match T::update(client, id, UpdateRequest { operations }).await {
            Ok(response) => {
                info!("Updated {} {}", T::DISPLAY_NAME, id);
                Some(response)
            }
            Err(e) => {
                add_client_error(diags, &format!("An error occurred while updating the {}", T::DISPLAY_NAME), &e);
                None
            }
        }
    }
}

#[async_trait]
impl<T: ConfigObject> Resource for ConfigResource<T> {
    type ProviderData = ProviderData;

    fn metadata(&self, provider_type_name: &str) -> String {
        if self.edit_only {
            format!("{}_default_{}", provider_type_name, T::NOUN)
        } else {
            format!("{}_{}", provider_type_name, T::NOUN)
        }
    }

    fn schema(&self) -> Schema {
        let description = if self.edit_only {
            format!("Resource to manage a {} that already exists.", T::DISPLAY_NAME)
        } else {
            format!("Resource to create and manage a {}.", T::DISPLAY_NAME)
        };
        schema_from_fields(description, &T::fields())
    }

    fn configure(&mut self, provider_data: Arc<ProviderData>) {
        self.data = Some(provider_data);
    }

    async fn create(&self, plan: Plan, diags: &mut Diagnostics) -> Option<State> {
        let client = self.client(diags)?;
        let plan: T = plan.get(diags)?;

        let response = if self.edit_only {
            self.adopt(client.as_ref(), &plan, diags).await?
        } else {
            self.add(client.as_ref(), &plan, diags).await?
        };
        self.to_state(&response, Some(&plan), diags)
    }

    async fn read(&self, state: State, diags: &mut Diagnostics) -> Option<ReadResult> {
        let client = self.client(diags)?;
        let prior: T = state.get(diags)?;
        let id = Self::identifier(&prior, diags)?;

        match T::get(client.as_ref(), &id).await {
            Ok(response) => self.to_state(&response, Some(&prior), diags).map(ReadResult::Present),
            Err(e) if e.is_not_found() && !self.edit_only => {
                warn!("{} {} not found, removing from state", T::DISPLAY_NAME, id);
                diags.add_warning(
                    format!("{} not found", T::DISPLAY_NAME),
                    format!("The {} '{}' no longer exists and will be removed from state", T::DISPLAY_NAME, id),
                );
                Some(ReadResult::Removed)
            }
            Err(e) => {
                add_client_error(diags, &format!("An error occurred while getting the {}", T::DISPLAY_NAME), &e);
                None
            }
        }
    }

    async fn update(&self, plan: Plan, prior: State, diags: &mut Diagnostics) -> Option<State> {
        let client = self.client(diags)?;
        let mut plan: T = plan.get(diags)?;
        let prior: T = prior.get(diags)?;
        let id = Self::identifier(&prior, diags)?;

        if let Some(planned) = plan.id().known() {
            if planned != &id {
                diags.add_attribute_error(
                    "id",
                    "Cannot change identifier",
                    format!("The id of a {} cannot change from '{}' to '{}'", T::DISPLAY_NAME, id, planned),
                );
                return None;
            }
        }

        let fields = T::fields();
        let operations = diff_operations(&fields, &plan, &prior);
        if operations.is_empty() {
            warn!("No configuration API operations created for update of {} {}", T::DISPLAY_NAME, id);
            resolve_unknowns(&fields, &mut plan, &prior);
            return State::from_model(&plan, diags);
        }

        let response = self.patch(client.as_ref(), &id, operations, diags).await?;
        self.to_state(&response, Some(&plan), diags)
    }

    async fn delete(&self, state: State, diags: &mut Diagnostics) -> Option<()> {
        if self.edit_only {
            debug!("{} is edit-only, delete only removes it from state", T::DISPLAY_NAME);
            return Some(());
        }

        let client = self.client(diags)?;
        let prior: T = state.get(diags)?;
        let id = Self::identifier(&prior, diags)?;

        match T::delete(client.as_ref(), &id).await {
            Ok(()) => {
                info!("Deleted {} {}", T::DISPLAY_NAME, id);
                Some(())
            }
            Err(e) if e.is_not_found() => {
                debug!("{} {} was already deleted", T::DISPLAY_NAME, id);
                Some(())
            }
            Err(e) => {
                add_client_error(diags, &format!("An error occurred while deleting the {}", T::DISPLAY_NAME), &e);
                None
            }
        }
    }
}
