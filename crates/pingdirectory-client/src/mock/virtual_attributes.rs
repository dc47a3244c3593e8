//! Virtual attribute operations for MockConfigApiClient
//!
//! Server-side defaults mirror what the configuration API reports for a freshly
//! created object.

use super::helpers::{apply_operations, property, Property, PropertyKind};
use super::{MockConfigApiClient, UpdateCall};
use crate::error::ConfigApiError;
use crate::models::*;

const SHARED_PROPERTIES: &[Property] = &[
    property("description", "description", PropertyKind::String, false),
    property("enabled", "enabled", PropertyKind::Bool, true),
    property("base-dn", "baseDN", PropertyKind::Set, false),
    property("group-dn", "groupDN", PropertyKind::Set, false),
    property("filter", "filter", PropertyKind::Set, false),
    property("client-connection-policy", "clientConnectionPolicy", PropertyKind::Set, false),
    property("conflict-behavior", "conflictBehavior", PropertyKind::String, false),
    property("require-explicit-request-by-name", "requireExplicitRequestByName", PropertyKind::Bool, false),
    property("multiple-virtual-attribute-evaluation-order-index", "multipleVirtualAttributeEvaluationOrderIndex", PropertyKind::Integer, false),
    property("multiple-virtual-attribute-merge-behavior", "multipleVirtualAttributeMergeBehavior", PropertyKind::String, false),
];

const DN_JOIN_PROPERTIES: &[Property] = &[
    property("join-dn-attribute", "joinDNAttribute", PropertyKind::String, true),
    property("join-base-dn-type", "joinBaseDNType", PropertyKind::String, true),
    property("join-custom-base-dn", "joinCustomBaseDN", PropertyKind::String, false),
    property("join-scope", "joinScope", PropertyKind::String, false),
    property("join-size-limit", "joinSizeLimit", PropertyKind::Integer, false),
    property("join-filter", "joinFilter", PropertyKind::String, false),
    property("join-attribute", "joinAttribute", PropertyKind::Set, false),
    property("attribute-type", "attributeType", PropertyKind::String, true),
];

const NUM_SUBORDINATES_PROPERTIES: &[Property] = &[
    property("attribute-type", "attributeType", PropertyKind::String, true),
];

fn properties(specific: &[Property]) -> Vec<Property> {
    SHARED_PROPERTIES.iter().chain(specific.iter()).copied().collect()
}

fn patch<T>(object: &T, specific: &[Property], operations: &[Operation]) -> Result<T, ConfigApiError>
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    let value = serde_json::to_value(object)?;
    let updated = apply_operations(&value, &properties(specific), operations)?;
    Ok(serde_json::from_value(updated)?)
}

pub fn add_dn_join(
    client: &MockConfigApiClient,
    request: AddDnJoinVirtualAttributeRequest,
) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
    client.begin_request()?;
    let mut store = client.dn_join_virtual_attributes.lock().unwrap();
    if store.contains_key(&request.id) {
        return Err(ConfigApiError::Api {
            status: 409,
            detail: format!("Virtual Attribute {} already exists", request.id),
        });
    }

    let created = DnJoinVirtualAttributeResponse {
        schemas: vec![DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA.to_string()],
        id: request.id.clone(),
        description: request.description,
        join_dn_attribute: request.join_dn_attribute,
        join_base_dn_type: request.join_base_dn_type,
        join_custom_base_dn: request.join_custom_base_dn,
        join_scope: Some(request.join_scope.unwrap_or(JoinScope::WholeSubtree)),
        join_size_limit: Some(request.join_size_limit.unwrap_or(0)),
        join_filter: request.join_filter,
        join_attribute: request.join_attribute,
        enabled: request.enabled,
        attribute_type: request.attribute_type,
        base_dn: request.base_dn,
        group_dn: request.group_dn,
        filter: request.filter,
        client_connection_policy: request.client_connection_policy,
        conflict_behavior: Some(request.conflict_behavior.unwrap_or(ConflictBehavior::RealOverridesVirtual)),
        require_explicit_request_by_name: Some(request.require_explicit_request_by_name.unwrap_or(false)),
        multiple_virtual_attribute_evaluation_order_index: Some(
            request.multiple_virtual_attribute_evaluation_order_index.unwrap_or(0),
        ),
        multiple_virtual_attribute_merge_behavior: Some(
            request
                .multiple_virtual_attribute_merge_behavior
                .unwrap_or(MultipleVirtualAttributeMergeBehavior::PreferVirtualValues),
        ),
        messages: None,
    };
    store.insert(created.id.clone(), created.clone());

    Ok(DnJoinVirtualAttributeResponse { messages: client.current_messages(), ..created })
}

pub fn get_dn_join(client: &MockConfigApiClient, id: &str) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
    client.begin_request()?;
    client
        .dn_join(id)
        .map(|attr| DnJoinVirtualAttributeResponse { messages: client.current_messages(), ..attr })
        .ok_or_else(|| ConfigApiError::NotFound(format!("Virtual Attribute {} not found", id)))
}

pub fn update_dn_join(
    client: &MockConfigApiClient,
    id: &str,
    request: UpdateRequest,
) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
    client.begin_request()?;
    client.update_calls.lock().unwrap().push(UpdateCall {
        id: id.to_string(),
        operations: request.operations.clone(),
    });

    let mut store = client.dn_join_virtual_attributes.lock().unwrap();
    let existing = store
        .get(id)
        .ok_or_else(|| ConfigApiError::NotFound(format!("Virtual Attribute {} not found", id)))?;
    let updated = patch(existing, DN_JOIN_PROPERTIES, &request.operations)?;
    store.insert(id.to_string(), updated.clone());

    Ok(DnJoinVirtualAttributeResponse { messages: client.current_messages(), ..updated })
}

pub fn delete_dn_join(client: &MockConfigApiClient, id: &str) -> Result<(), ConfigApiError> {
    client.begin_request()?;
    client
        .dn_join_virtual_attributes
        .lock()
        .unwrap()
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| ConfigApiError::NotFound(format!("Virtual Attribute {} not found", id)))
}

pub fn add_num_subordinates(
    client: &MockConfigApiClient,
    request: AddNumSubordinatesVirtualAttributeRequest,
) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
    client.begin_request()?;
    let mut store = client.num_subordinates_virtual_attributes.lock().unwrap();
    if store.contains_key(&request.id) {
        return Err(ConfigApiError::Api {
            status: 409,
            detail: format!("Virtual Attribute {} already exists", request.id),
        });
    }

    let created = NumSubordinatesVirtualAttributeResponse {
        schemas: vec![NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA.to_string()],
        id: request.id.clone(),
        description: request.description,
        enabled: request.enabled,
        attribute_type: request.attribute_type.unwrap_or_else(|| "numSubordinates".to_string()),
        base_dn: request.base_dn,
        group_dn: request.group_dn,
        filter: request.filter,
        client_connection_policy: request.client_connection_policy,
        conflict_behavior: Some(request.conflict_behavior.unwrap_or(ConflictBehavior::VirtualOverridesReal)),
        require_explicit_request_by_name: Some(request.require_explicit_request_by_name.unwrap_or(false)),
        multiple_virtual_attribute_evaluation_order_index: Some(
            request.multiple_virtual_attribute_evaluation_order_index.unwrap_or(0),
        ),
        multiple_virtual_attribute_merge_behavior: Some(
            request
                .multiple_virtual_attribute_merge_behavior
                .unwrap_or(MultipleVirtualAttributeMergeBehavior::PreferVirtualValues),
        ),
        messages: None,
    };
    store.insert(created.id.clone(), created.clone());

    Ok(NumSubordinatesVirtualAttributeResponse { messages: client.current_messages(), ..created })
}

pub fn get_num_subordinates(
    client: &MockConfigApiClient,
    id: &str,
) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
    client.begin_request()?;
    client
        .num_subordinates(id)
        .map(|attr| NumSubordinatesVirtualAttributeResponse { messages: client.current_messages(), ..attr })
        .ok_or_else(|| ConfigApiError::NotFound(format!("Virtual Attribute {} not found", id)))
}

pub fn update_num_subordinates(
    client: &MockConfigApiClient,
    id: &str,
    request: UpdateRequest,
) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
    client.begin_request()?;
    client.update_calls.lock().unwrap().push(UpdateCall {
        id: id.to_string(),
        operations: request.operations.clone(),
    });

    let mut store = client.num_subordinates_virtual_attributes.lock().unwrap();
    let existing = store
        .get(id)
        .ok_or_else(|| ConfigApiError::NotFound(format!("Virtual Attribute {} not found", id)))?;
    let updated = patch(existing, NUM_SUBORDINATES_PROPERTIES, &request.operations)?;
    store.insert(id.to_string(), updated.clone());

    Ok(NumSubordinatesVirtualAttributeResponse { messages: client.current_messages(), ..updated })
}

pub fn delete_num_subordinates(client: &MockConfigApiClient, id: &str) -> Result<(), ConfigApiError> {
    client.begin_request()?;
    client
        .num_subordinates_virtual_attributes
        .lock()
        .unwrap()
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| ConfigApiError::NotFound(format!("Virtual Attribute {} not found", id)))
}
