//! Num Subordinates Virtual Attribute
//!
//! Generates the number of immediate subordinates of an entry. The server ships
//! one named `numSubordinates`, which is usually managed through the edit-only
//! variant.

use super::*;
use crate::error::ProviderError;
use crate::operations::{Field, FieldMode, FieldTable};
use crate::resource::mapping::*;
use crate::resource::ConfigObject;
use async_trait::async_trait;
use pingdirectory_client::{
    AddNumSubordinatesVirtualAttributeRequest, ConfigApiClientTrait, ConfigApiError, ConfigMessages, ConflictBehavior,
    MultipleVirtualAttributeMergeBehavior, NumSubordinatesVirtualAttributeResponse, UpdateRequest,
    NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA,
};
use plugin_framework::AttrValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Plan and state model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumSubordinatesVirtualAttribute {
    pub id: AttrValue<String>,
    pub description: AttrValue<String>,
    pub enabled: AttrValue<bool>,
    pub attribute_type: AttrValue<String>,
    pub base_dn: AttrValue<BTreeSet<String>>,
    pub group_dn: AttrValue<BTreeSet<String>>,
    pub filter: AttrValue<BTreeSet<String>>,
    pub client_connection_policy: AttrValue<BTreeSet<String>>,
    pub conflict_behavior: AttrValue<String>,
    pub require_explicit_request_by_name: AttrValue<bool>,
    pub multiple_virtual_attribute_evaluation_order_index: AttrValue<i64>,
    pub multiple_virtual_attribute_merge_behavior: AttrValue<String>,
    pub notifications: AttrValue<BTreeSet<String>>,
    pub required_actions: AttrValue<BTreeSet<String>>,
}

#[async_trait]
impl ConfigObject for NumSubordinatesVirtualAttribute {
    type AddRequest = AddNumSubordinatesVirtualAttributeRequest;
    type Response = NumSubordinatesVirtualAttributeResponse;

    const NOUN: &'static str = "num_subordinates_virtual_attribute";
    const DISPLAY_NAME: &'static str = "Num Subordinates Virtual Attribute";

    fn fields() -> Vec<Field<Self>> {
        FieldTable::<Self>::new()
            .string("id", FieldMode::Identifier, |m| &m.id, |m| &mut m.id)
            .describe(ID)
            .string("description", FieldMode::Optional, |m| &m.description, |m| &mut m.description)
            .describe(DESCRIPTION)
            .bool("enabled", FieldMode::Required, |m| &m.enabled, |m| &mut m.enabled)
            .describe(ENABLED)
            .string("attribute_type", FieldMode::OptionalComputed, |m| &m.attribute_type, |m| &mut m.attribute_type)
            .describe(ATTRIBUTE_TYPE)
            .string_set("base_dn", FieldMode::OptionalComputed, |m| &m.base_dn, |m| &mut m.base_dn)
            .describe(BASE_DN)
            .string_set("group_dn", FieldMode::OptionalComputed, |m| &m.group_dn, |m| &mut m.group_dn)
            .describe(GROUP_DN)
            .string_set("filter", FieldMode::OptionalComputed, |m| &m.filter, |m| &mut m.filter)
            .describe(FILTER)
            .string_set(
                "client_connection_policy",
                FieldMode::OptionalComputed,
                |m| &m.client_connection_policy,
                |m| &mut m.client_connection_policy,
            )
            .describe(CLIENT_CONNECTION_POLICY)
            .string("conflict_behavior", FieldMode::OptionalComputed, |m| &m.conflict_behavior, |m| &mut m.conflict_behavior)
            .describe(CONFLICT_BEHAVIOR)
            .one_of(ConflictBehavior::VALUES)
            .bool(
                "require_explicit_request_by_name",
                FieldMode::OptionalComputed,
                |m| &m.require_explicit_request_by_name,
                |m| &mut m.require_explicit_request_by_name,
            )
            .describe(REQUIRE_EXPLICIT_REQUEST_BY_NAME)
            .int64(
                "multiple_virtual_attribute_evaluation_order_index",
                FieldMode::OptionalComputed,
                |m| &m.multiple_virtual_attribute_evaluation_order_index,
                |m| &mut m.multiple_virtual_attribute_evaluation_order_index,
            )
            .describe(EVALUATION_ORDER_INDEX)
            .string(
                "multiple_virtual_attribute_merge_behavior",
                FieldMode::OptionalComputed,
                |m| &m.multiple_virtual_attribute_merge_behavior,
                |m| &mut m.multiple_virtual_attribute_merge_behavior,
            )
            .describe(MERGE_BEHAVIOR)
            .one_of(MultipleVirtualAttributeMergeBehavior::VALUES)
            .string_set("notifications", FieldMode::Computed, |m| &m.notifications, |m| &mut m.notifications)
            .describe(NOTIFICATIONS)
            .string_set("required_actions", FieldMode::Computed, |m| &m.required_actions, |m| &mut m.required_actions)
            .describe(REQUIRED_ACTIONS)
            .build()
    }

    fn id(&self) -> &AttrValue<String> {
        &self.id
    }

    fn add_request(&self) -> Result<AddNumSubordinatesVirtualAttributeRequest, ProviderError> {
        Ok(AddNumSubordinatesVirtualAttributeRequest {
            schemas: vec![NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA.to_string()],
            id: required_string("id", &self.id)?,
            description: optional_string(&self.description),
            enabled: required_bool("enabled", &self.enabled)?,
            attribute_type: optional_string(&self.attribute_type),
            base_dn: self.base_dn.to_vec(),
            group_dn: self.group_dn.to_vec(),
            filter: self.filter.to_vec(),
            client_connection_policy: self.client_connection_policy.to_vec(),
            conflict_behavior: optional_enum("conflict_behavior", &self.conflict_behavior)?,
            require_explicit_request_by_name: self.require_explicit_request_by_name.known().copied(),
            multiple_virtual_attribute_evaluation_order_index: self
                .multiple_virtual_attribute_evaluation_order_index
                .known()
                .copied(),
            multiple_virtual_attribute_merge_behavior: optional_enum(
                "multiple_virtual_attribute_merge_behavior",
                &self.multiple_virtual_attribute_merge_behavior,
            )?,
        })
    }

    fn from_response(r: &NumSubordinatesVirtualAttributeResponse, expected: Option<&Self>) -> Self {
        let (notifications, required_actions) = message_sets(r.messages.as_ref());
        Self {
            id: AttrValue::string(r.id.as_str()),
            description: string_from_response(r.description.as_ref(), expected.map(|e| &e.description)),
            enabled: AttrValue::Known(r.enabled),
            attribute_type: AttrValue::string(r.attribute_type.as_str()),
            base_dn: set_from_response(r.base_dn.as_ref()),
            group_dn: set_from_response(r.group_dn.as_ref()),
            filter: set_from_response(r.filter.as_ref()),
            client_connection_policy: set_from_response(r.client_connection_policy.as_ref()),
            conflict_behavior: enum_from_response(r.conflict_behavior.as_ref()),
            require_explicit_request_by_name: AttrValue::from_option(r.require_explicit_request_by_name),
            multiple_virtual_attribute_evaluation_order_index: AttrValue::from_option(
                r.multiple_virtual_attribute_evaluation_order_index,
            ),
            multiple_virtual_attribute_merge_behavior: enum_from_response(
                r.multiple_virtual_attribute_merge_behavior.as_ref(),
            ),
            notifications,
            required_actions,
        }
    }

    fn messages(response: &NumSubordinatesVirtualAttributeResponse) -> Option<&ConfigMessages> {
        response.messages.as_ref()
    }

    async fn add(
        client: &dyn ConfigApiClientTrait,
        request: AddNumSubordinatesVirtualAttributeRequest,
    ) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
        client.add_num_subordinates_virtual_attribute(request).await
    }

    async fn get(
        client: &dyn ConfigApiClientTrait,
        id: &str,
    ) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
        client.get_num_subordinates_virtual_attribute(id).await
    }

    async fn update(
        client: &dyn ConfigApiClientTrait,
        id: &str,
        request: UpdateRequest,
    ) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError> {
        client.update_num_subordinates_virtual_attribute(id, request).await
    }

    async fn delete(client: &dyn ConfigApiClientTrait, id: &str) -> Result<(), ConfigApiError> {
        client.delete_num_subordinates_virtual_attribute(id).await
    }
}
