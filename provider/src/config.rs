//! Provider configuration
//!
//! Every attribute of the provider block falls back to an environment variable
//! when it is not set in configuration.

use crate::error::ProviderError;
use crate::version::ProductVersion;
use pingdirectory_client::ClientSettings;
use plugin_framework::{AttrValue, Attribute, AttributeType, Schema};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

pub const HTTPS_HOST_ENV: &str = "PINGDIRECTORY_PROVIDER_HTTPS_HOST";
pub const USERNAME_ENV: &str = "PINGDIRECTORY_PROVIDER_USERNAME";
pub const PASSWORD_ENV: &str = "PINGDIRECTORY_PROVIDER_PASSWORD";
pub const INSECURE_TRUST_ALL_TLS_ENV: &str = "PINGDIRECTORY_PROVIDER_INSECURE_TRUST_ALL_TLS";
pub const CA_CERTIFICATE_PEM_FILES_ENV: &str = "PINGDIRECTORY_PROVIDER_CA_CERTIFICATE_PEM_FILES";
pub const PRODUCT_VERSION_ENV: &str = "PINGDIRECTORY_PROVIDER_PRODUCT_VERSION";

/// Provider block as written by the user
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawProviderConfig {
    https_host: AttrValue<String>,
    username: AttrValue<String>,
    password: AttrValue<String>,
    insecure_trust_all_tls: AttrValue<bool>,
    ca_certificate_pem_files: AttrValue<BTreeSet<String>>,
    product_version: AttrValue<String>,
}

/// Resolved provider configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub https_host: String,
    pub username: String,
    pub password: String,
    pub insecure_trust_all_tls: bool,
    pub ca_certificate_pem_files: Vec<PathBuf>,
    pub product_version: ProductVersion,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("https_host", &self.https_host)
            .field("username", &self.username)
            .field("insecure_trust_all_tls", &self.insecure_trust_all_tls)
            .field("ca_certificate_pem_files", &self.ca_certificate_pem_files)
            .field("product_version", &self.product_version)
            .finish()
    }
}

/// Schema of the provider block
pub fn provider_schema() -> Schema {
    Schema::new("PingDirectory provider")
        .with_attribute(
            Attribute::optional("https_host", AttributeType::String).with_description(format!(
                "URI for PingDirectory HTTPS port. Default value can be set with the {} environment variable.",
                HTTPS_HOST_ENV
            )),
        )
        .with_attribute(
            Attribute::optional("username", AttributeType::String).with_description(format!(
                "Username for PingDirectory admin user. Default value can be set with the {} environment variable.",
                USERNAME_ENV
            )),
        )
        .with_attribute(
            Attribute::optional("password", AttributeType::String)
                .sensitive()
                .with_description(format!(
                    "Password for PingDirectory admin user. Default value can be set with the {} environment variable.",
                    PASSWORD_ENV
                )),
        )
        .with_attribute(
            Attribute::optional("insecure_trust_all_tls", AttributeType::Bool).with_description(format!(
                "Set to true to trust any certificate when connecting to the PingDirectory server. This is insecure and should not be enabled outside of testing. Default value can be set with the {} environment variable.",
                INSECURE_TRUST_ALL_TLS_ENV
            )),
        )
        .with_attribute(
            Attribute::optional("ca_certificate_pem_files", AttributeType::StringSet).with_description(format!(
                "Paths to files containing PEM-encoded certificates to be trusted as root CAs when connecting to the PingDirectory server over HTTPS. Default value can be set with the {} environment variable, using commas to delimit multiple PEM files.",
                CA_CERTIFICATE_PEM_FILES_ENV
            )),
        )
        .with_attribute(
            Attribute::optional("product_version", AttributeType::String).with_description(format!(
                "Version of the PingDirectory server being configured. Default value can be set with the {} environment variable.",
                PRODUCT_VERSION_ENV
            )),
        )
}

impl ProviderConfig {
    /// Resolve from the provider block, falling back to the process environment
    pub fn from_config(config: &Value) -> Result<Self, ProviderError> {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Resolve from the provider block, falling back to `env` for unset attributes
    pub fn resolve<F>(config: &Value, env: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw: RawProviderConfig = if config.is_null() {
            RawProviderConfig::default()
        } else {
            serde_json::from_value(config.clone()).map_err(|e| ProviderError::Decode(e.to_string()))?
        };

        let https_host = required_string("https_host", &raw.https_host, HTTPS_HOST_ENV, &env)?;
        let username = required_string("username", &raw.username, USERNAME_ENV, &env)?;
        let password = required_string("password", &raw.password, PASSWORD_ENV, &env)?;
        let product_version = required_string("product_version", &raw.product_version, PRODUCT_VERSION_ENV, &env)?;

        let insecure_trust_all_tls = match known("insecure_trust_all_tls", &raw.insecure_trust_all_tls)? {
            Some(value) => *value,
            None => match env(INSECURE_TRUST_ALL_TLS_ENV) {
                Some(value) => value.trim().parse().map_err(|_| {
                    ProviderError::InvalidConfig(format!(
                        "{} must be 'true' or 'false', got '{}'",
                        INSECURE_TRUST_ALL_TLS_ENV, value
                    ))
                })?,
                None => false,
            },
        };

        let ca_certificate_pem_files = match known("ca_certificate_pem_files", &raw.ca_certificate_pem_files)? {
            Some(files) => files.iter().map(PathBuf::from).collect(),
            None => env(CA_CERTIFICATE_PEM_FILES_ENV)
                .map(|value| {
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|file| !file.is_empty())
                        .map(PathBuf::from)
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Self {
            https_host: https_host.trim_end_matches('/').to_string(),
            username,
            password,
            insecure_trust_all_tls,
            ca_certificate_pem_files,
            product_version: ProductVersion::parse_supported(&product_version)?,
        })
    }

    /// Client settings, reading every configured CA certificate file
    pub fn client_settings(&self, user_agent: &str) -> Result<ClientSettings, ProviderError> {
        let ca_certificates_pem = self
            .ca_certificate_pem_files
            .iter()
            .map(|file| {
                std::fs::read(file).map_err(|e| {
                    ProviderError::InvalidConfig(format!(
                        "failed to read CA certificate file {}: {}",
                        file.display(),
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClientSettings {
            base_url: self.https_host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            insecure_trust_all_tls: self.insecure_trust_all_tls,
            ca_certificates_pem,
            user_agent: Some(user_agent.to_string()),
        })
    }
}

fn known<'a, T>(attribute: &str, value: &'a AttrValue<T>) -> Result<Option<&'a T>, ProviderError> {
    if value.is_unknown() {
        return Err(ProviderError::InvalidConfig(format!(
            "{} must be known when the provider is configured",
            attribute
        )));
    }
    Ok(value.known())
}

fn required_string<F>(attribute: &str, value: &AttrValue<String>, env_name: &str, env: &F) -> Result<String, ProviderError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = known(attribute, value)?.filter(|v| !v.is_empty()) {
        return Ok(value.clone());
    }
    env(env_name).filter(|v| !v.is_empty()).ok_or_else(|| {
        ProviderError::InvalidConfig(format!(
            "{} is required: set it in the provider block or with the {} environment variable",
            attribute, env_name
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugin_framework::UNKNOWN_VALUE;
    use serde_json::json;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    fn full_config() -> Value {
        json!({
            "https_host": "https://localhost:1443/",
            "username": "cn=administrator",
            "password": "2FederateM0re",
            "insecure_trust_all_tls": true,
            "product_version": "9.3.0.0"
        })
    }

    #[test]
    fn test_config_block_is_used_as_is() {
        let config = ProviderConfig::resolve(&full_config(), env_of(&[])).unwrap();
        assert_eq!(config.https_host, "https://localhost:1443");
        assert!(config.insecure_trust_all_tls);
        assert!(config.ca_certificate_pem_files.is_empty());
        assert_eq!(config.product_version.to_string(), "9.3.0.0");
    }

    #[test]
    fn test_environment_fills_unset_attributes() {
        let env = env_of(&[
            (HTTPS_HOST_ENV, "https://pd.example.com:1443"),
            (USERNAME_ENV, "cn=env"),
            (PASSWORD_ENV, "secret"),
            (PRODUCT_VERSION_ENV, "9.2"),
            (INSECURE_TRUST_ALL_TLS_ENV, "false"),
            (CA_CERTIFICATE_PEM_FILES_ENV, "/etc/ca/one.pem, /etc/ca/two.pem,"),
        ]);
        let config = ProviderConfig::resolve(&json!({"username": "cn=block"}), env).unwrap();

        assert_eq!(config.https_host, "https://pd.example.com:1443");
        assert_eq!(config.username, "cn=block");
        assert_eq!(config.password, "secret");
        assert_eq!(config.product_version.to_string(), "9.2.0.0");
        assert_eq!(
            config.ca_certificate_pem_files,
            vec![PathBuf::from("/etc/ca/one.pem"), PathBuf::from("/etc/ca/two.pem")]
        );
    }

    #[test]
    fn test_missing_required_attribute_names_env_var() {
        let err = ProviderConfig::resolve(&json!({"https_host": "https://localhost:1443"}), env_of(&[])).unwrap_err();
        assert!(err.to_string().contains(USERNAME_ENV));
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let mut config = full_config();
        config["password"] = json!(UNKNOWN_VALUE);
        assert!(matches!(
            ProviderConfig::resolve(&config, env_of(&[])),
            Err(ProviderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unsupported_product_version_is_rejected() {
        let mut config = full_config();
        config["product_version"] = json!("10.0.0.0");
        assert!(matches!(
            ProviderConfig::resolve(&config, env_of(&[])),
            Err(ProviderError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_unexpected_attribute_is_a_decode_error() {
        let mut config = full_config();
        config["token"] = json!("abc");
        assert!(matches!(
            ProviderConfig::resolve(&config, env_of(&[])),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_ca_file_is_reported() {
        let mut config = full_config();
        config["ca_certificate_pem_files"] = json!(["/nonexistent/ca.pem"]);
        let resolved = ProviderConfig::resolve(&config, env_of(&[])).unwrap();
        let err = resolved.client_settings("terraform-provider-pingdirectory/test").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ca.pem"));
    }

    #[test]
    fn test_debug_output_hides_password() {
        let config = ProviderConfig::resolve(&full_config(), env_of(&[])).unwrap();
        assert!(!format!("{:?}", config).contains("2FederateM0re"));
    }
}
