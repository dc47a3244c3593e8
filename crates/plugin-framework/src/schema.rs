//! Attribute schemas
//!
//! A schema is a flat, ordered list of attributes. Attribute order is significant:
//! it is the order in which resources compare and emit changes.

use crate::diagnostics::Diagnostics;
use crate::value::UNKNOWN_VALUE;
use serde::Serialize;
use serde_json::Value;

/// Attribute value type
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Int64,
    StringSet,
}

impl AttributeType {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Bool => value.is_boolean(),
            AttributeType::Int64 => value.is_i64(),
            AttributeType::StringSet => value
                .as_array()
                .is_some_and(|values| values.iter().all(Value::is_string)),
        }
    }
}

/// One attribute of a schema
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    /// Changing the value forces a new resource
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_replace: bool,
    /// Allowed string values (enumerations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl Attribute {
    fn new(name: &str, attribute_type: AttributeType, required: bool, optional: bool, computed: bool) -> Self {
        Self {
            name: name.to_string(),
            attribute_type,
            description: String::new(),
            required,
            optional,
            computed,
            sensitive: false,
            requires_replace: false,
            allowed_values: None,
        }
    }

    /// Must be configured
    pub fn required(name: &str, attribute_type: AttributeType) -> Self {
        Self::new(name, attribute_type, true, false, false)
    }

    /// May be configured
    pub fn optional(name: &str, attribute_type: AttributeType) -> Self {
        Self::new(name, attribute_type, false, true, false)
    }

    /// May be configured; the server supplies a value otherwise
    pub fn optional_computed(name: &str, attribute_type: AttributeType) -> Self {
        Self::new(name, attribute_type, false, true, true)
    }

    /// Read-only, supplied by the server
    pub fn computed(name: &str, attribute_type: AttributeType) -> Self {
        Self::new(name, attribute_type, false, false, true)
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Restrict a string attribute to a fixed set of values
    pub fn with_allowed_values(mut self, values: &[&str]) -> Self {
        self.allowed_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Mark the value as sensitive
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Changing the value replaces the resource
    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }
}

/// Schema of a provider or resource
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Schema {
    pub version: i64,
    pub description: String,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    /// Empty schema, version 0
    pub fn new(description: impl Into<String>) -> Self {
        Self { version: 0, description: description.into(), attributes: Vec::new() }
    }

    /// Append an attribute
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check a configuration document against this schema
    ///
    /// Reports unknown attributes, missing required attributes, type mismatches,
    /// values outside an enumeration and values set on computed-only attributes.
    /// Unknown values pass every check.
    pub fn validate(&self, config: &Value, diags: &mut Diagnostics) {
        let Some(object) = config.as_object() else {
            diags.add_error("Invalid configuration", "configuration must be a JSON object");
            return;
        };

        for name in object.keys() {
            if self.attribute(name).is_none() {
                diags.add_attribute_error(name, "Unsupported attribute", format!("'{}' is not expected here", name));
            }
        }

        for attribute in &self.attributes {
            let value = object.get(&attribute.name).unwrap_or(&Value::Null);
            if value.as_str() == Some(UNKNOWN_VALUE) {
                continue;
            }

            if value.is_null() {
                if attribute.required {
                    diags.add_attribute_error(
                        &attribute.name,
                        "Missing required argument",
                        format!("The argument '{}' is required, but no definition was found.", attribute.name),
                    );
                }
                continue;
            }

            if !attribute.optional && !attribute.required {
                diags.add_attribute_error(
                    &attribute.name,
                    "Value for unconfigurable attribute",
                    format!("'{}' is computed and cannot be set", attribute.name),
                );
                continue;
            }

            if !attribute.attribute_type.accepts(value) {
                diags.add_attribute_error(
                    &attribute.name,
                    "Incorrect attribute value type",
                    format!("'{}' must be of type {:?}", attribute.name, attribute.attribute_type),
                );
                continue;
            }

            if let (Some(allowed), Some(s)) = (&attribute.allowed_values, value.as_str()) {
                if !allowed.iter().any(|a| a == s) {
                    diags.add_attribute_error(
                        &attribute.name,
                        "Invalid Attribute Value Match",
                        format!(
                            "Attribute {} value must be one of: {}, got: \"{}\"",
                            attribute.name,
                            allowed.iter().map(|a| format!("\"{}\"", a)).collect::<Vec<_>>().join(", "),
                            s
                        ),
                    );
                }
            }
        }
    }
}
