//! ConfigApiClient trait for mocking
//!
//! This trait abstracts the ConfigApiClient to enable mocking in unit tests.
//! The concrete ConfigApiClient implements this trait, and tests can use mock implementations.

use crate::error::ConfigApiError;
use crate::models::*;

/// Trait for configuration API operations
///
/// One `add`/`get`/`update`/`delete` quartet per config object type.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait ConfigApiClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    // DN Join Virtual Attribute
    async fn add_dn_join_virtual_attribute(&self, request: AddDnJoinVirtualAttributeRequest) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError>;
    async fn get_dn_join_virtual_attribute(&self, id: &str) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError>;
    async fn update_dn_join_virtual_attribute(&self, id: &str, request: UpdateRequest) -> Result<DnJoinVirtualAttributeResponse, ConfigApiError>;
    async fn delete_dn_join_virtual_attribute(&self, id: &str) -> Result<(), ConfigApiError>;

    // Num Subordinates Virtual Attribute
    async fn add_num_subordinates_virtual_attribute(&self, request: AddNumSubordinatesVirtualAttributeRequest) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError>;
    async fn get_num_subordinates_virtual_attribute(&self, id: &str) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError>;
    async fn update_num_subordinates_virtual_attribute(&self, id: &str, request: UpdateRequest) -> Result<NumSubordinatesVirtualAttributeResponse, ConfigApiError>;
    async fn delete_num_subordinates_virtual_attribute(&self, id: &str) -> Result<(), ConfigApiError>;
}
