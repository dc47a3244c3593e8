//! Virtual attribute resources
//!
//! Both types live in the `virtual-attributes` collection and share most of
//! their properties; the descriptions below are shared between their tables.

pub mod dn_join;
#[cfg(test)]
mod dn_join_test;
pub mod num_subordinates;
#[cfg(test)]
mod num_subordinates_test;

pub use dn_join::DnJoinVirtualAttribute;
pub use num_subordinates::NumSubordinatesVirtualAttribute;

pub(crate) const ID: &str = "Name of this object.";
pub(crate) const DESCRIPTION: &str = "A description for this Virtual Attribute";
pub(crate) const ENABLED: &str = "Indicates whether the Virtual Attribute is enabled for use.";
pub(crate) const ATTRIBUTE_TYPE: &str =
    "Specifies the attribute type for the attribute whose values are to be dynamically assigned by the virtual attribute.";
pub(crate) const BASE_DN: &str =
    "Specifies the base DNs for the branches containing entries that are eligible to use this virtual attribute.";
pub(crate) const GROUP_DN: &str =
    "Specifies the DNs of the groups whose members can be eligible to use this virtual attribute.";
pub(crate) const FILTER: &str =
    "Specifies the search filters to be applied against entries to determine if the virtual attribute is to be generated for those entries.";
pub(crate) const CLIENT_CONNECTION_POLICY: &str =
    "Specifies a set of client connection policies for which this Virtual Attribute should be generated. If this is undefined, then this Virtual Attribute will always be generated. If it is associated with one or more client connection policies, then this Virtual Attribute will be generated only for operations requested by clients assigned to one of those client connection policies.";
pub(crate) const CONFLICT_BEHAVIOR: &str =
    "Specifies the behavior that the server is to exhibit for entries that already contain one or more real values for the associated attribute.";
pub(crate) const REQUIRE_EXPLICIT_REQUEST_BY_NAME: &str =
    "Indicates whether attributes of this type must be explicitly included by name in the list of requested attributes. Note that this will only apply to virtual attributes which are associated with an attribute type that is operational. It will be ignored for virtual attributes associated with a non-operational attribute type.";
pub(crate) const EVALUATION_ORDER_INDEX: &str =
    "Specifies the order in which virtual attribute definitions for the same attribute type will be evaluated when generating values for an entry.";
pub(crate) const MERGE_BEHAVIOR: &str =
    "Specifies the behavior that will be exhibited for cases in which multiple virtual attribute definitions apply to the same multivalued attribute type. This will be ignored for attributes with a single-valued attribute type.";
pub(crate) const NOTIFICATIONS: &str = "Notifications returned by the PingDirectory Configuration API.";
pub(crate) const REQUIRED_ACTIONS: &str = "Required actions returned by the PingDirectory Configuration API.";
