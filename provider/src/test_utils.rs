//! Test utilities for unit testing resources
//!
//! This module provides helpers for creating test data and wiring resources to
//! the mock configuration API client.

use crate::provider::ProviderData;
use crate::resource::{ConfigObject, ConfigResource};
use pingdirectory_client::{
    ConflictBehavior, DnJoinVirtualAttributeResponse, JoinBaseDnType, JoinScope, MockConfigApiClient,
    MultipleVirtualAttributeMergeBehavior, NumSubordinatesVirtualAttributeResponse,
    DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA, NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA,
};
use plugin_framework::Resource;
use std::sync::Arc;

/// Helper to create a mock client
pub fn mock_client() -> MockConfigApiClient {
    MockConfigApiClient::new("https://localhost:1443")
}

/// Helper to create provider data backed by `client`
pub fn provider_data(client: &MockConfigApiClient) -> Arc<ProviderData> {
    Arc::new(ProviderData {
        client: Arc::new(client.clone()),
        product_version: "9.3.0.0".parse().unwrap(),
    })
}

/// Helper to create a configured managed resource
pub fn managed<T: ConfigObject>(client: &MockConfigApiClient) -> ConfigResource<T> {
    let mut resource = ConfigResource::<T>::managed();
    resource.configure(provider_data(client));
    resource
}

/// Helper to create a configured edit-only resource
pub fn edit_only<T: ConfigObject>(client: &MockConfigApiClient) -> ConfigResource<T> {
    let mut resource = ConfigResource::<T>::edit_only();
    resource.configure(provider_data(client));
    resource
}

/// Helper to create a stored DN Join virtual attribute with server defaults
pub fn dn_join_response(id: &str) -> DnJoinVirtualAttributeResponse {
    DnJoinVirtualAttributeResponse {
        schemas: vec![DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA.to_string()],
        id: id.to_string(),
        description: None,
        join_dn_attribute: "manager".to_string(),
        join_base_dn_type: JoinBaseDnType::UseSearchBaseDn,
        join_custom_base_dn: None,
        join_scope: Some(JoinScope::WholeSubtree),
        join_size_limit: Some(0),
        join_filter: None,
        join_attribute: None,
        enabled: true,
        attribute_type: "managerOf".to_string(),
        base_dn: Some(vec!["dc=example,dc=com".to_string()]),
        group_dn: None,
        filter: None,
        client_connection_policy: None,
        conflict_behavior: Some(ConflictBehavior::RealOverridesVirtual),
        require_explicit_request_by_name: Some(false),
        multiple_virtual_attribute_evaluation_order_index: Some(0),
        multiple_virtual_attribute_merge_behavior: Some(MultipleVirtualAttributeMergeBehavior::PreferVirtualValues),
        messages: None,
    }
}

/// Helper to create the server's built-in `numSubordinates` virtual attribute
pub fn num_subordinates_response(id: &str) -> NumSubordinatesVirtualAttributeResponse {
    NumSubordinatesVirtualAttributeResponse {
        schemas: vec![NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA.to_string()],
        id: id.to_string(),
        description: None,
        enabled: true,
        attribute_type: "numSubordinates".to_string(),
        base_dn: None,
        group_dn: None,
        filter: None,
        client_connection_policy: None,
        conflict_behavior: Some(ConflictBehavior::VirtualOverridesReal),
        require_explicit_request_by_name: Some(false),
        multiple_virtual_attribute_evaluation_order_index: Some(0),
        multiple_virtual_attribute_merge_behavior: Some(MultipleVirtualAttributeMergeBehavior::PreferVirtualValues),
        messages: None,
    }
}
