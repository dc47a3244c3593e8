//! PingDirectory product versions
//!
//! Versions are dotted numerics `major.minor.maintenance.patch`. Shorter forms
//! are padded with zeros (`9.2` is `9.2.0.0`).

use crate::error::ProviderError;
use std::fmt;
use std::str::FromStr;

/// Releases this provider supports, any patch level
const SUPPORTED_RELEASES: &[(u32, u32, u32)] = &[(9, 1, 0), (9, 2, 0), (9, 3, 0)];

/// A parsed product version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductVersion {
    parts: [u32; 4],
}

impl ProductVersion {
    /// Parse and check against the supported releases
    pub fn parse_supported(value: &str) -> Result<Self, ProviderError> {
        let version: ProductVersion = value.parse()?;
        if version.is_supported() {
            Ok(version)
        } else {
            Err(ProviderError::UnsupportedVersion {
                version: version.to_string(),
                supported: supported_releases(),
            })
        }
    }

    /// True when the release is one this provider supports
    pub fn is_supported(&self) -> bool {
        let [major, minor, maintenance, _] = self.parts;
        SUPPORTED_RELEASES.contains(&(major, minor, maintenance))
    }
}

fn supported_releases() -> String {
    SUPPORTED_RELEASES
        .iter()
        .map(|(major, minor, maintenance)| format!("{}.{}.{}.x", major, minor, maintenance))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for ProductVersion {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            ProviderError::invalid_value(
                "product_version",
                format!("'{}' is not a valid product version: {}", s, reason),
            )
        };

        let segments: Vec<&str> = s.trim().split('.').collect();
        if segments.len() > 4 {
            return Err(invalid("at most four components are allowed"));
        }

        let mut parts = [0u32; 4];
        for (slot, segment) in parts.iter_mut().zip(&segments) {
            *slot = segment
                .parse()
                .map_err(|_| invalid("components must be non-negative integers"))?;
        }
        Ok(Self { parts })
    }
}

impl fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, maintenance, patch] = self.parts;
        write!(f, "{}.{}.{}.{}", major, minor, maintenance, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_versions_are_padded() {
        assert_eq!("9.2".parse::<ProductVersion>().unwrap().to_string(), "9.2.0.0");
        assert_eq!("9.3.0.1".parse::<ProductVersion>().unwrap().to_string(), "9.3.0.1");
    }

    #[test]
    fn test_malformed_versions_are_rejected() {
        assert!("9.x".parse::<ProductVersion>().is_err());
        assert!("".parse::<ProductVersion>().is_err());
        assert!("9.1.0.0.1".parse::<ProductVersion>().is_err());
    }

    #[test]
    fn test_supported_releases() {
        assert!(ProductVersion::parse_supported("9.1.0.4").is_ok());
        assert!(ProductVersion::parse_supported("9.3").is_ok());
        match ProductVersion::parse_supported("8.3.0.0") {
            Err(ProviderError::UnsupportedVersion { version, supported }) => {
                assert_eq!(version, "8.3.0.0");
                assert!(supported.contains("9.1.0.x"));
            }
            other => panic!("expected unsupported version, got {:?}", other),
        }
    }

    #[test]
    fn test_versions_order_numerically() {
        let older: ProductVersion = "9.2.0.10".parse().unwrap();
        let newer: ProductVersion = "9.10".parse().unwrap();
        assert!(older < newer);
    }
}
