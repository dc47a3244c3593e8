//! Mock ConfigApiClient for unit testing
//!
//! This module provides a mock implementation of ConfigApiClientTrait that can be used
//! in unit tests without requiring a running PingDirectory instance.
//!
//! The mock is organized into:
//! - `virtual_attributes.rs` - add/get/update/delete for virtual attribute types
//! - `helpers.rs` - patch operation application over stored JSON objects

mod helpers;
mod virtual_attributes;

use crate::error::ConfigApiError;
use crate::models::*;
use crate::config_trait::ConfigApiClientTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A recorded call to one of the update methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCall {
    pub id: String,
    pub operations: Vec<Operation>,
}

/// Mock ConfigApiClient for testing
///
/// Stores config objects in memory, applies patch operations the way the server does,
/// and records every update call so tests can assert on the exact operation list.
#[derive(Debug, Clone)]
pub struct MockConfigApiClient {
    pub(crate) base_url: String,
    pub(crate) dn_join_virtual_attributes: Arc<Mutex<HashMap<String, DnJoinVirtualAttributeResponse>>>,
    pub(crate) num_subordinates_virtual_attributes: Arc<Mutex<HashMap<String, NumSubordinatesVirtualAttributeResponse>>>,
    pub(crate) update_calls: Arc<Mutex<Vec<UpdateCall>>>,
    pub(crate) request_count: Arc<Mutex<usize>>,
    pub(crate) failure: Arc<Mutex<Option<(u16, String)>>>,
    pub(crate) messages: Arc<Mutex<Option<ConfigMessages>>>,
}

impl MockConfigApiClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            dn_join_virtual_attributes: Arc::new(Mutex::new(HashMap::new())),
            num_subordinates_virtual_attributes: Arc::new(Mutex::new(HashMap::new())),
            update_calls: Arc::new(Mutex::new(Vec::new())),
            request_count: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
            messages: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a DN Join virtual attribute to the mock store (for test setup)
    pub fn add_dn_join(&self, attr: DnJoinVirtualAttributeResponse) {
        self.dn_join_virtual_attributes.lock().unwrap().insert(attr.id.clone(), attr);
    }

    /// Add a Num Subordinates virtual attribute to the mock store (for test setup)
    pub fn add_num_subordinates(&self, attr: NumSubordinatesVirtualAttributeResponse) {
        self.num_subordinates_virtual_attributes.lock().unwrap().insert(attr.id.clone(), attr);
    }

    /// Stored DN Join virtual attribute, if any
    pub fn dn_join(&self, id: &str) -> Option<DnJoinVirtualAttributeResponse> {
        self.dn_join_virtual_attributes.lock().unwrap().get(id).cloned()
    }

    /// Stored Num Subordinates virtual attribute, if any
    pub fn num_subordinates(&self, id: &str) -> Option<NumSubordinatesVirtualAttributeResponse> {
        self.num_subordinates_virtual_attributes.lock().unwrap().get(id).cloned()
    }

    /// Every update call made so far, in order
    pub fn update_calls(&self) -> Vec<UpdateCall> {
        self.update_calls.lock().unwrap().clone()
    }

    /// Number of requests of any kind made so far
    pub fn request_count(&self) -> usize {
        *self.request_count.lock().unwrap()
    }

    /// Make every subsequent call fail with the given status and detail
    pub fn fail_with(&self, status: u16, detail: impl Into<String>) {
        *self.failure.lock().unwrap() = Some((status, detail.into()));
    }

    /// Attach notifications/required actions to every subsequent response
    pub fn set_messages(&self, messages: ConfigMessages) {
        *self.messages.lock().unwrap() = Some(messages);
    }

    /// Count the request and return the configured failure, if any
    pub(crate) fn begin_request(&self) -> Result<(), ConfigApiError> {
        *self.request_count.lock().unwrap() += 1;
        match self.failure.lock().unwrap().clone() {
            Some((404, detail)) => Err(ConfigApiError::NotFound(detail)),
            Some((status, detail)) => Err(ConfigApiError::Api { status, detail }),
            None => Ok(()),
        }
    }

    pub(crate) fn current_messages(&self) -> Option<ConfigMessages> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ConfigApiClientTrait for MockConfigApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn add_dn_join_virtual_attribute(&self, request: AddDnJoinVirtualAttributeRequest) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
        virtual_attributes::add_dn_join(self, request)
    }

    async fn get_dn_join_virtual_attribute(&self, id: &str) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
        virtual_attributes::get_dn_join(self, id)
    }

    async fn update_dn_join_virtual_attribute(&self, id: &str, request: UpdateRequest) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
        virtual_attributes::update_dn_join(self, id, request)
    }

    async fn delete_dn_join_virtual_attribute(&self, id: &str) -> Result<(), ConfigApiError> {
        virtual_attributes::delete_dn_join(self, id)
    }

    async fn add_num_subordinates_virtual_attribute(&self, request: AddNumSubordinatesVirtualAttributeRequest) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
        virtual_attributes::add_num_subordinates(self, request)
    }

    async fn get_num_subordinates_virtual_attribute(&self, id: &str) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
        virtual_attributes::get_num_subordinates(self, id)
    }

    async fn update_num_subordinates_virtual_attribute(&self, id: &str, request: UpdateRequest) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
        virtual_attributes::update_num_subordinates(self, id, request)
    }

    async fn delete_num_subordinates_virtual_attribute(&self, id: &str) -> Result<(), ConfigApiError> {
        virtual_attributes::delete_num_subordinates(self, id)
    }
}
