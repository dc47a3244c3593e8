//! Tri-state attribute values
//!
//! Every attribute in a plan or state is either null (not configured), unknown
//! (computed, not yet known during planning) or known. Keeping the three apart
//! avoids sentinel values in resource models.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// Marker string the host uses for unknown values in JSON documents
pub const UNKNOWN_VALUE: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

/// A single attribute value in a plan or state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrValue<T> {
    /// Not configured
    Null,
    /// Computed, value not known until apply
    Unknown,
    /// Configured or read from the server
    Known(T),
}

impl<T> Default for AttrValue<T> {
    fn default() -> Self {
        AttrValue::Null
    }
}

impl<T> AttrValue<T> {
    /// True when the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    /// True when the value is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, AttrValue::Unknown)
    }

    /// True when the value is neither null nor unknown
    pub fn is_known(&self) -> bool {
        matches!(self, AttrValue::Known(_))
    }

    /// Borrow the known value
    pub fn known(&self) -> Option<&T> {
        match self {
            AttrValue::Known(value) => Some(value),
            _ => None,
        }
    }

    /// Take the known value
    pub fn into_known(self) -> Option<T> {
        match self {
            AttrValue::Known(value) => Some(value),
            _ => None,
        }
    }

    /// Known when `Some`, null otherwise
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(AttrValue::Null, AttrValue::Known)
    }

    /// Map the known value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AttrValue<U> {
        match self {
            AttrValue::Null => AttrValue::Null,
            AttrValue::Unknown => AttrValue::Unknown,
            AttrValue::Known(value) => AttrValue::Known(f(value)),
        }
    }
}

impl<T: Clone> AttrValue<T> {
    /// Replace an unknown value with `fallback`
    pub fn or_if_unknown(&self, fallback: &AttrValue<T>) -> AttrValue<T> {
        match self {
            AttrValue::Unknown => fallback.clone(),
            other => other.clone(),
        }
    }
}

impl AttrValue<String> {
    /// Known string shorthand
    pub fn string(value: impl Into<String>) -> Self {
        AttrValue::Known(value.into())
    }

    /// True for a known empty string
    pub fn is_empty_string(&self) -> bool {
        matches!(self, AttrValue::Known(s) if s.is_empty())
    }

    /// The value when it is known and not empty
    ///
    /// Null and empty strings are the same "not configured" for optional strings.
    pub fn non_empty(&self) -> Option<&str> {
        match self {
            AttrValue::Known(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

impl AttrValue<BTreeSet<String>> {
    /// Known set shorthand
    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttrValue::Known(values.into_iter().map(Into::into).collect())
    }

    /// Known set built from an optional server list; absent means empty
    pub fn set_from_option(values: Option<Vec<String>>) -> Self {
        AttrValue::Known(values.unwrap_or_default().into_iter().collect())
    }

    /// The values as a list, for request bodies
    pub fn to_vec(&self) -> Option<Vec<String>> {
        self.known().map(|set| set.iter().cloned().collect())
    }
}

impl<T: Serialize> Serialize for AttrValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttrValue::Null => serializer.serialize_none(),
            AttrValue::Unknown => serializer.serialize_str(UNKNOWN_VALUE),
            AttrValue::Known(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for AttrValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        match raw {
            serde_json::Value::Null => Ok(AttrValue::Null),
            serde_json::Value::String(ref s) if s == UNKNOWN_VALUE => Ok(AttrValue::Unknown),
            other => serde_json::from_value(other)
                .map(AttrValue::Known)
                .map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Model {
        #[serde(default)]
        name: AttrValue<String>,
        #[serde(default)]
        enabled: AttrValue<bool>,
        #[serde(default)]
        base_dn: AttrValue<BTreeSet<String>>,
    }

    #[test]
    fn test_missing_and_null_decode_as_null() {
        let model: Model = serde_json::from_value(json!({"enabled": null})).unwrap();
        assert!(model.name.is_null());
        assert!(model.enabled.is_null());
    }

    #[test]
    fn test_unknown_marker_decodes_as_unknown() {
        let model: Model = serde_json::from_value(json!({
            "name": UNKNOWN_VALUE,
            "enabled": UNKNOWN_VALUE,
            "base_dn": UNKNOWN_VALUE
        }))
        .unwrap();
        assert!(model.name.is_unknown());
        assert!(model.enabled.is_unknown());
        assert!(model.base_dn.is_unknown());
    }

    #[test]
    fn test_known_values_round_trip() {
        let model = Model {
            name: AttrValue::string("manager-of"),
            enabled: AttrValue::Known(true),
            base_dn: AttrValue::set(["dc=b", "dc=a"]),
        };
        let encoded = serde_json::to_value(&model).unwrap();
        assert_eq!(
            encoded,
            json!({"name": "manager-of", "enabled": true, "base_dn": ["dc=a", "dc=b"]})
        );
        let decoded: Model = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, model);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let result: Result<Model, _> = serde_json::from_value(json!({"enabled": "yes"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_string_is_not_configured() {
        assert_eq!(AttrValue::string("").non_empty(), None);
        assert_eq!(AttrValue::<String>::Null.non_empty(), None);
        assert_eq!(AttrValue::string("x").non_empty(), Some("x"));
        assert!(AttrValue::string("").is_empty_string());
    }
}
