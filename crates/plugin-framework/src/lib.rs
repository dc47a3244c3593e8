//! Provider plugin framework
//!
//! The host-facing contract a provider implements, independent of any remote API:
//!
//! - **Values**: [`AttrValue`], an explicit null / unknown / known tri-state
//! - **Schemas**: [`Schema`] and [`Attribute`] describing a resource's attribute bag
//! - **Diagnostics**: error and warning collection returned to the caller
//! - **Containers**: JSON-backed [`Plan`] and [`State`] with typed get/set
//! - **Traits**: [`Provider`] and [`Resource`] lifecycle (metadata, schema, configure,
//!   create, read, update, delete, import)
//! - **Host**: [`ProviderHost`], a JSON-lines request dispatcher over any async reader/writer

pub mod diagnostics;
pub mod error;
pub mod host;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod value;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::HostError;
pub use host::{HostRequest, HostResponse, ProviderHost, SchemaDocument};
pub use provider::{Provider, ProviderMetadata};
pub use resource::{import_state_passthrough_id, Plan, ReadResult, Resource, State};
pub use schema::{Attribute, AttributeType, Schema};
pub use value::{AttrValue, UNKNOWN_VALUE};

// Re-export async_trait for implementors
pub use async_trait::async_trait;
