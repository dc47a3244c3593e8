//! Conversions between model attribute values and configuration API bodies

use crate::error::ProviderError;
use pingdirectory_client::ConfigMessages;
use plugin_framework::AttrValue;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

type StringSet = BTreeSet<String>;

fn missing(attribute: &str) -> ProviderError {
    ProviderError::invalid_value(attribute, "a known value is required")
}

/// Value of a required string attribute
pub fn required_string(attribute: &str, value: &AttrValue<String>) -> Result<String, ProviderError> {
    value.known().cloned().ok_or_else(|| missing(attribute))
}

/// Value of a required bool attribute
pub fn required_bool(attribute: &str, value: &AttrValue<bool>) -> Result<bool, ProviderError> {
    value.known().copied().ok_or_else(|| missing(attribute))
}

/// Parsed value of a required enumeration attribute
pub fn required_enum<E>(attribute: &str, value: &AttrValue<String>) -> Result<E, ProviderError>
where
    E: FromStr<Err = String>,
{
    optional_enum(attribute, value)?.ok_or_else(|| missing(attribute))
}

/// Parsed value of an optional enumeration attribute; unset is `None`
pub fn optional_enum<E>(attribute: &str, value: &AttrValue<String>) -> Result<Option<E>, ProviderError>
where
    E: FromStr<Err = String>,
{
    value
        .non_empty()
        .map(|s| s.parse().map_err(|message| ProviderError::invalid_value(attribute, message)))
        .transpose()
}

/// An optional string for a request body; empty strings are not sent
pub fn optional_string(value: &AttrValue<String>) -> Option<String> {
    value.non_empty().map(str::to_string)
}

/// String attribute from a response
///
/// An absent value stays an empty string when that is what was expected.
pub fn string_from_response(value: Option<&String>, expected: Option<&AttrValue<String>>) -> AttrValue<String> {
    match value {
        Some(value) => AttrValue::string(value.as_str()),
        None if expected.is_some_and(AttrValue::is_empty_string) => AttrValue::string(""),
        None => AttrValue::Null,
    }
}

/// Enumeration attribute from a response
pub fn enum_from_response<E: Display>(value: Option<&E>) -> AttrValue<String> {
    AttrValue::from_option(value.map(ToString::to_string))
}

/// Set attribute from a response; an absent list is an empty set
pub fn set_from_response(values: Option<&Vec<String>>) -> AttrValue<StringSet> {
    AttrValue::set_from_option(values.cloned())
}

/// `notifications` and `required_actions` attributes from the messages extension
pub fn message_sets(messages: Option<&ConfigMessages>) -> (AttrValue<StringSet>, AttrValue<StringSet>) {
    let notifications = messages
        .map(|m| m.notifications.iter().cloned().collect())
        .unwrap_or_default();
    let required_actions = messages
        .map(|m| m.required_actions.iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    (AttrValue::Known(notifications), AttrValue::Known(required_actions))
}
