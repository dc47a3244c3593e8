//! PingDirectory Configuration API Client
//!
//! A Rust client library for the PingDirectory configuration REST API (`/config`).
//! Provides type-safe models and one add/get/update/delete quartet per config object type.
//!
//! # Example
//!
//! ```no_run
//! use pingdirectory_client::{ClientSettings, ConfigApiClient, ConfigApiClientTrait, Operation, UpdateRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ConfigApiClient::new(ClientSettings {
//!     base_url: "https://localhost:1443".to_string(),
//!     username: "cn=administrator".to_string(),
//!     password: "2FederateM0re".to_string(),
//!     ..Default::default()
//! })?;
//!
//! // Read a virtual attribute
//! let attr = client.get_num_subordinates_virtual_attribute("numSubordinates").await?;
//!
//! // Patch only what changed
//! let request = UpdateRequest {
//!     operations: vec![Operation::replace("enabled", (!attr.enabled).to_string())],
//! };
//! client.update_num_subordinates_virtual_attribute(&attr.id, request).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod config_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{ClientSettings, ConfigApiClient};
pub use common::HttpClient;
pub use config_trait::ConfigApiClientTrait;
pub use error::ConfigApiError;
pub use models::*;
#[cfg(feature = "test-util")]
pub use mock::MockConfigApiClient;
