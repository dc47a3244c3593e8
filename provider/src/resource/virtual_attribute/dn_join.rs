//! DN Join Virtual Attribute
//!
//! Generates values from the entries whose DNs are held in an attribute of the
//! target entry (for example `managerOf` from `manager`).

use super::*;
use crate::error::ProviderError;
use crate::operations::{Field, FieldMode, FieldTable};
use crate::resource::mapping::*;
use crate::resource::ConfigObject;
use async_trait::async_trait;
use pingdirectory_client::{
    AddDnJoinVirtualAttributeRequest, ConfigApiClientTrait, ConfigApiError, ConfigMessages, ConflictBehavior,
    DnJoinVirtualAttributeResponse, JoinBaseDnType, JoinScope, MultipleVirtualAttributeMergeBehavior,
    UpdateRequest, DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA,
};
use plugin_framework::AttrValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Plan and state model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnJoinVirtualAttribute {
    pub id: AttrValue<String>,
    pub description: AttrValue<String>,
    pub join_dn_attribute: AttrValue<String>,
    pub join_base_dn_type: AttrValue<String>,
    pub join_custom_base_dn: AttrValue<String>,
    pub join_scope: AttrValue<String>,
    pub join_size_limit: AttrValue<i64>,
    pub join_filter: AttrValue<String>,
    pub join_attribute: AttrValue<BTreeSet<String>>,
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
impl ConfigObject for DnJoinVirtualAttribute {
    type AddRequest = AddDnJoinVirtualAttributeRequest;
    type Response = DnJoinVirtualAttributeResponse;

    const NOUN: &'static str = "dn_join_virtual_attribute";
    const DISPLAY_NAME: &'static str = "DN Join Virtual Attribute";

    fn fields() -> Vec<Field<Self>> {
        FieldTable::<Self>::new()
            .string("id", FieldMode::Identifier, |m| &m.id, |m| &mut m.id)
            .describe(ID)
            .string("description", FieldMode::Optional, |m| &m.description, |m| &mut m.description)
            .describe(DESCRIPTION)
            .string("join_dn_attribute", FieldMode::Required, |m| &m.join_dn_attribute, |m| &mut m.join_dn_attribute)
            .describe("The attribute whose values are the DNs of the entries to be joined with the target entry.")
            .string("join_base_dn_type", FieldMode::Required, |m| &m.join_base_dn_type, |m| &mut m.join_base_dn_type)
            .describe("Specifies how server should determine the base DN for the internal searches used to identify joined entries.")
            .one_of(JoinBaseDnType::VALUES)
            .string("join_custom_base_dn", FieldMode::Optional, |m| &m.join_custom_base_dn, |m| &mut m.join_custom_base_dn)
            .describe("The fixed, administrator-specified base DN for the internal searches used to identify joined entries, if the join-base-dn-type property has a value of use-custom-base-dn.")
            .string("join_scope", FieldMode::OptionalComputed, |m| &m.join_scope, |m| &mut m.join_scope)
            .describe("The scope for searches used to identify joined entries.")
            .one_of(JoinScope::VALUES)
            .int64("join_size_limit", FieldMode::OptionalComputed, |m| &m.join_size_limit, |m| &mut m.join_size_limit)
            .describe("The maximum number of entries that may be joined with the source entry, which also corresponds to the maximum number of values that the virtual attribute provider will generate for an entry.")
            .string("join_filter", FieldMode::Optional, |m| &m.join_filter, |m| &mut m.join_filter)
            .describe("An optional filter that specifies additional criteria for identifying joined entries. If a join-filter value is specified, then only entries matching that filter (in addition to satisfying the other join criteria) will be joined with the search result entry.")
            .string_set("join_attribute", FieldMode::OptionalComputed, |m| &m.join_attribute, |m| &mut m.join_attribute)
            .describe("An optional set of the names of the attributes to include with joined entries.")
            .bool("enabled", FieldMode::Required, |m| &m.enabled, |m| &mut m.enabled)
            .describe(ENABLED)
            .string("attribute_type", FieldMode::Required, |m| &m.attribute_type, |m| &mut m.attribute_type)
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

    fn add_request(&self) -> Result<AddDnJoinVirtualAttributeRequest, ProviderError> {
        Ok(AddDnJoinVirtualAttributeRequest {
            schemas: vec![DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA.to_string()],
            id: required_string("id", &self.id)?,
            description: optional_string(&self.description),
            join_dn_attribute: required_string("join_dn_attribute", &self.join_dn_attribute)?,
            join_base_dn_type: required_enum("join_base_dn_type", &self.join_base_dn_type)?,
            join_custom_base_dn: optional_string(&self.join_custom_base_dn),
            join_scope: optional_enum("join_scope", &self.join_scope)?,
            join_size_limit: self.join_size_limit.known().copied(),
            join_filter: optional_string(&self.join_filter),
            join_attribute: self.join_attribute.to_vec(),
            enabled: required_bool("enabled", &self.enabled)?,
            attribute_type: required_string("attribute_type", &self.attribute_type)?,
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

    fn from_response(r: &DnJoinVirtualAttributeResponse, expected: Option<&Self>) -> Self {
        let (notifications, required_actions) = message_sets(r.messages.as_ref());
        Self {
            id: AttrValue::string(r.id.as_str()),
            description: string_from_response(r.description.as_ref(), expected.map(|e| &e.description)),
            join_dn_attribute: AttrValue::string(r.join_dn_attribute.as_str()),
            join_base_dn_type: AttrValue::string(r.join_base_dn_type.as_str()),
            join_custom_base_dn: string_from_response(
                r.join_custom_base_dn.as_ref(),
                expected.map(|e| &e.join_custom_base_dn),
            ),
            join_scope: enum_from_response(r.join_scope.as_ref()),
            join_size_limit: AttrValue::from_option(r.join_size_limit),
            join_filter: string_from_response(r.join_filter.as_ref(), expected.map(|e| &e.join_filter)),
            join_attribute: set_from_response(r.join_attribute.as_ref()),
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

    fn messages(response: &DnJoinVirtualAttributeResponse) -> Option<&ConfigMessages> {
        response.messages.as_ref()
    }

    async fn add(
        client: &dyn ConfigApiClientTrait,
        request: AddDnJoinVirtualAttributeRequest,
    ) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
        client.add_dn_join_virtual_attribute(request).await
    }

    async fn get(client: &dyn ConfigApiClientTrait, id: &str) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
        client.get_dn_join_virtual_attribute(id).await
    }

    async fn update(
        client: &dyn ConfigApiClientTrait,
        id: &str,
        request: UpdateRequest,
    ) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError> {
        client.update_dn_join_virtual_attribute(id, request).await
    }

    async fn delete(client: &dyn ConfigApiClientTrait, id: &str) -> Result<(), ConfigApiError> {
        client.delete_dn_join_virtual_attribute(id).await
    }
}
