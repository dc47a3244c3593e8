//! Configuration API models
//!
//! These models match the PingDirectory configuration API (`/config`) JSON bodies.
//! Property names are camelCase on the wire; patch paths use the hyphenated
//! configuration property names (e.g. `join-dn-attribute`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Schema URN of DN Join virtual attributes
pub const DN_JOIN_VIRTUAL_ATTRIBUTE_SCHEMA: &str =
    "urn:pingidentity:schemas:configuration:2.0:virtual-attribute:dn-join";

/// Schema URN of Num Subordinates virtual attributes
pub const NUM_SUBORDINATES_VIRTUAL_ATTRIBUTE_SCHEMA: &str =
    "urn:pingidentity:schemas:configuration:2.0:virtual-attribute:num-subordinates";

/// Extension key carrying server notifications and required actions
pub const MESSAGES_SCHEMA: &str = "urn:pingidentity:schemas:configuration:messages:2.0";

/// Declares a configuration enumeration with its kebab-case wire values.
macro_rules! config_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every wire value, in declaration order
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            /// Wire value of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(format!(
                        "invalid value '{}' for {}, must be one of: {}",
                        other,
                        stringify!($name),
                        Self::VALUES.join(", ")
                    )),
                }
            }
        }
    };
}

config_enum!(
    /// How the base DN for a DN join search is chosen
    JoinBaseDnType {
        UseSearchBaseDn => "use-search-base-dn",
        UseCustomBaseDn => "use-custom-base-dn",
    }
);

config_enum!(
    /// LDAP search scope for DN join searches
    JoinScope {
        BaseObject => "base-object",
        SingleLevel => "single-level",
        WholeSubtree => "whole-subtree",
        SubordinateSubtree => "subordinate-subtree",
    }
);

config_enum!(
    /// Behavior when an entry has both real and virtual values
    ConflictBehavior {
        RealOverridesVirtual => "real-overrides-virtual",
        VirtualOverridesReal => "virtual-overrides-real",
        MergeRealAndVirtual => "merge-real-and-virtual",
    }
);

config_enum!(
    /// Behavior when several virtual attribute providers target one attribute
    MultipleVirtualAttributeMergeBehavior {
        PreferRealValues => "prefer-real-values",
        PreferVirtualValues => "prefer-virtual-values",
        MergeRealAndVirtualValues => "merge-real-and-virtual-values",
    }
);

/// Notifications and required actions returned alongside a config object
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMessages {
    #[serde(default)]
    pub notifications: Vec<String>,
    #[serde(default)]
    pub required_actions: Vec<RequiredAction>,
}

/// An administrative action the server needs before a change takes effect
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequiredAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(rename = "type")]
    pub action_type: String,
    pub synopsis: String,
}

impl fmt::Display for RequiredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{} ({}): {}", self.action_type, property, self.synopsis),
            None => write!(f, "{}: {}", self.action_type, self.synopsis),
        }
    }
}

/// Request body for creating a DN Join virtual attribute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddDnJoinVirtualAttributeRequest {
    pub schemas: Vec<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "joinDNAttribute")]
    pub join_dn_attribute: String,
    #[serde(rename = "joinBaseDNType")]
    pub join_base_dn_type: JoinBaseDnType,
    #[serde(rename = "joinCustomBaseDN", skip_serializing_if = "Option::is_none")]
    pub join_custom_base_dn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_scope: Option<JoinScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_size_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_attribute: Option<Vec<String>>,
    pub enabled: bool,
    pub attribute_type: String,
    #[serde(rename = "baseDN", skip_serializing_if = "Option::is_none")]
    pub base_dn: Option<Vec<String>>,
    #[serde(rename = "groupDN", skip_serializing_if = "Option::is_none")]
    pub group_dn: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_connection_policy: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_behavior: Option<ConflictBehavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_explicit_request_by_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_virtual_attribute_evaluation_order_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_virtual_attribute_merge_behavior: Option<MultipleVirtualAttributeMergeBehavior>,
}

/// DN Join virtual attribute as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DnJoinVirtualAttributeResponse {
    pub schemas: Vec<String>,
    pub id: String,
    pub description: Option<String>,
    #[serde(rename = "joinDNAttribute")]
    pub join_dn_attribute: String,
    #[serde(rename = "joinBaseDNType")]
    pub join_base_dn_type: JoinBaseDnType,
    #[serde(rename = "joinCustomBaseDN")]
    pub join_custom_base_dn: Option<String>,
    pub join_scope: Option<JoinScope>,
    pub join_size_limit: Option<i64>,
    pub join_filter: Option<String>,
    pub join_attribute: Option<Vec<String>>,
    pub enabled: bool,
    pub attribute_type: String,
    #[serde(rename = "baseDN")]
    pub base_dn: Option<Vec<String>>,
    #[serde(rename = "groupDN")]
    pub group_dn: Option<Vec<String>>,
    pub filter: Option<Vec<String>>,
    pub client_connection_policy: Option<Vec<String>>,
    pub conflict_behavior: Option<ConflictBehavior>,
    pub require_explicit_request_by_name: Option<bool>,
    pub multiple_virtual_attribute_evaluation_order_index: Option<i64>,
    pub multiple_virtual_attribute_merge_behavior: Option<MultipleVirtualAttributeMergeBehavior>,
    #[serde(rename = "urn:pingidentity:schemas:configuration:messages:2.0", default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<ConfigMessages>,
}

/// Request body for creating a Num Subordinates virtual attribute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddNumSubordinatesVirtualAttributeRequest {
    pub schemas: Vec<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,
    #[serde(rename = "baseDN", skip_serializing_if = "Option::is_none")]
    pub base_dn: Option<Vec<String>>,
    #[serde(rename = "groupDN", skip_serializing_if = "Option::is_none")]
    pub group_dn: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_connection_policy: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_behavior: Option<ConflictBehavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_explicit_request_by_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_virtual_attribute_evaluation_order_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_virtual_attribute_merge_behavior: Option<MultipleVirtualAttributeMergeBehavior>,
}

/// Num Subordinates virtual attribute as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NumSubordinatesVirtualAttributeResponse {
    pub schemas: Vec<String>,
    pub id: String,
    pub description: Option<String>,
    pub enabled: bool,
    pub attribute_type: String,
    #[serde(rename = "baseDN")]
    pub base_dn: Option<Vec<String>>,
    #[serde(rename = "groupDN")]
    pub group_dn: Option<Vec<String>>,
    pub filter: Option<Vec<String>>,
    pub client_connection_policy: Option<Vec<String>>,
    pub conflict_behavior: Option<ConflictBehavior>,
    pub require_explicit_request_by_name: Option<bool>,
    pub multiple_virtual_attribute_evaluation_order_index: Option<i64>,
    pub multiple_virtual_attribute_merge_behavior: Option<MultipleVirtualAttributeMergeBehavior>,
    #[serde(rename = "urn:pingidentity:schemas:configuration:messages:2.0", default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<ConfigMessages>,
}

/// Minimal view of any config object, used to check its type before decoding
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigObjectHeader {
    #[serde(default)]
    pub schemas: Vec<String>,
}

/// Patch operation kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Add,
    Remove,
    Replace,
}

/// A single field-level patch instruction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operation {
    pub op: OperationKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Operation {
    /// Replace the value of a single-valued property
    pub fn replace(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self { op: OperationKind::Replace, path: path.into(), value: Some(value.into()) }
    }

    /// Add one value to a multi-valued property
    pub fn add(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self { op: OperationKind::Add, path: path.into(), value: Some(value.into()) }
    }

    /// Remove one value from a multi-valued property
    pub fn remove_value(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self { op: OperationKind::Remove, path: path.into(), value: Some(value.into()) }
    }

    /// Reset a property to its default (no value)
    pub fn remove(path: impl Into<String>) -> Self {
        Self { op: OperationKind::Remove, path: path.into(), value: None }
    }
}

/// Request body for PATCH
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRequest {
    pub operations: Vec<Operation>,
}

/// Error body returned by the configuration API on failure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub schemas: Vec<String>,
    pub status: Option<String>,
    pub scim_type: Option<String>,
    pub detail: Option<String>,
}
