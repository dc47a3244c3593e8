//! Helper functions for applying patch operations to stored config objects

use crate::error::ConfigApiError;
use crate::models::{Operation, OperationKind};
use serde_json::Value;

/// JSON type of a configuration property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropertyKind {
    String,
    Bool,
    Integer,
    Set,
}

/// Maps a patch path (`base-dn`) to its JSON key (`baseDN`)
#[derive(Debug, Clone, Copy)]
pub(crate) struct Property {
    pub path: &'static str,
    pub key: &'static str,
    pub kind: PropertyKind,
    pub required: bool,
}

pub(crate) const fn property(path: &'static str, key: &'static str, kind: PropertyKind, required: bool) -> Property {
    Property { path, key, kind, required }
}

/// Apply operations to a JSON config object, all or nothing
pub(crate) fn apply_operations(
    object: &Value,
    properties: &[Property],
    operations: &[Operation],
) -> Result<Value, ConfigApiError> {
    let mut updated = object.clone();
    let map = updated
        .as_object_mut()
        .ok_or_else(|| ConfigApiError::InvalidRequest("config object is not a JSON object".to_string()))?;

    for operation in operations {
        let property = properties
            .iter()
            .find(|p| p.path == operation.path)
            .ok_or_else(|| {
                ConfigApiError::InvalidRequest(format!("unknown property '{}'", operation.path))
            })?;

        match (operation.op, property.kind, operation.value.as_deref()) {
            (OperationKind::Replace, PropertyKind::Set, Some(value)) => {
                map.insert(property.key.to_string(), Value::Array(vec![Value::String(value.to_string())]));
            }
            (OperationKind::Replace, kind, Some(value)) => {
                map.insert(property.key.to_string(), scalar(property, kind, value)?);
            }
            (OperationKind::Add, PropertyKind::Set, Some(value)) => {
                let entry = map
                    .entry(property.key.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                if entry.is_null() {
                    *entry = Value::Array(Vec::new());
                }
                if let Value::Array(values) = entry {
                    let value = Value::String(value.to_string());
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
            }
            (OperationKind::Remove, PropertyKind::Set, Some(value)) => {
                if let Some(Value::Array(values)) = map.get_mut(property.key) {
                    values.retain(|v| v.as_str() != Some(value));
                }
            }
            (OperationKind::Remove, _, None) => {
                if property.required {
                    return Err(ConfigApiError::InvalidRequest(format!(
                        "property '{}' is required and cannot be removed",
                        property.path
                    )));
                }
                map.remove(property.key);
            }
            (op, _, _) => {
                return Err(ConfigApiError::InvalidRequest(format!(
                    "operation {:?} is not valid for property '{}'",
                    op, property.path
                )));
            }
        }
    }

    Ok(updated)
}

fn scalar(property: &Property, kind: PropertyKind, value: &str) -> Result<Value, ConfigApiError> {
    let invalid = || {
        ConfigApiError::InvalidRequest(format!(
            "invalid value '{}' for property '{}'",
            value, property.path
        ))
    };
    match kind {
        PropertyKind::String => Ok(Value::String(value.to_string())),
        PropertyKind::Bool => value.parse::<bool>().map(Value::Bool).map_err(|_| invalid()),
        PropertyKind::Integer => value
            .parse::<i64>()
            .map(|v| Value::Number(v.into()))
            .map_err(|_| invalid()),
        PropertyKind::Set => Ok(Value::Array(vec![Value::String(value.to_string())])),
    }
}
