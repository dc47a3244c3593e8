//! Common utilities for the configuration API client
//!
//! Provides the authenticated HTTP wrapper shared by every config object type.

use crate::error::ConfigApiError;
use crate::models::ApiErrorResponse;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

/// Base path of the configuration API
pub const CONFIG_API_PATH: &str = "/config";

/// HTTP client wrapper with basic authentication
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, username: String, password: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path below `/config`
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, CONFIG_API_PATH, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
    }

    /// Make a GET request
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ConfigApiError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self.authorized(self.client.get(&url)).send().await?;
        Self::decode(response, "GET", path).await
    }

    /// Make a POST request
    pub async fn post<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ConfigApiError> {
        let url = self.build_url(path);
        debug!(
            "POST {} with body: {}",
            url,
            serde_json::to_string_pretty(body).unwrap_or_default()
        );

        let response = self
            .authorized(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        Self::decode(response, "POST", path).await
    }

    /// Make a PATCH request
    pub async fn patch<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ConfigApiError> {
        let url = self.build_url(path);
        debug!(
            "PATCH {} with body: {}",
            url,
            serde_json::to_string_pretty(body).unwrap_or_default()
        );

        let response = self
            .authorized(self.client.patch(&url))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        Self::decode(response, "PATCH", path).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), ConfigApiError> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);

        let response = self.authorized(self.client.delete(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from(response, "DELETE", path).await);
        }

        Ok(())
    }

    async fn decode<T: for<'de> Deserialize<'de>>(
        response: Response,
        method: &str,
        path: &str,
    ) -> Result<T, ConfigApiError> {
        if !response.status().is_success() {
            return Err(Self::error_from(response, method, path).await);
        }

        let response_text = response.text().await?;
        debug!("{} {} response: {}", method, path, response_text);
        serde_json::from_str(&response_text).map_err(ConfigApiError::Serialization)
    }

    async fn error_from(response: Response, method: &str, path: &str) -> ConfigApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!("{} {} failed: {} - {}", method, path, status, body);

        if status == StatusCode::NOT_FOUND {
            return ConfigApiError::NotFound(format!("{} - {}", path, error_detail(&body)));
        }

        ConfigApiError::Api {
            status: status.as_u16(),
            detail: error_detail(&body),
        }
    }
}

/// Extract the human readable detail from an API error body
///
/// Falls back to the raw body when it is not a configuration API error document.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(ApiErrorResponse { detail: Some(detail), .. }) => detail,
        _ => body.to_string(),
    }
}

/// Encode an object identifier for use as a path segment
pub fn object_path(collection: &str, id: &str) -> String {
    format!("/{}/{}", collection, urlencoding::encode(id))
}
