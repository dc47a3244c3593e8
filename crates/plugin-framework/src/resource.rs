//! Resource lifecycle contract and plan/state containers

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

fn decode<T: DeserializeOwned>(raw: &Value, what: &str, diags: &mut Diagnostics) -> Option<T> {
    match serde_json::from_value(raw.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            diags.add_error(format!("Unable to decode {}", what), e.to_string());
            None
        }
    }
}

/// The desired configuration of one resource instance
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    raw: Value,
}

impl Plan {
    /// Wrap a raw JSON plan
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Decode into a typed model
    pub fn get<T: DeserializeOwned>(&self, diags: &mut Diagnostics) -> Option<T> {
        decode(&self.raw, "plan", diags)
    }

    /// The raw JSON
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// The last-known applied configuration of one resource instance
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    raw: Value,
}

impl State {
    /// Wrap a raw JSON state
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Encode a typed model
    pub fn from_model<T: Serialize>(model: &T, diags: &mut Diagnostics) -> Option<Self> {
        match serde_json::to_value(model) {
            Ok(raw) => Some(Self { raw }),
            Err(e) => {
                diags.add_error("Unable to encode state", e.to_string());
                None
            }
        }
    }

    /// Decode into a typed model
    pub fn get<T: DeserializeOwned>(&self, diags: &mut Diagnostics) -> Option<T> {
        decode(&self.raw, "state", diags)
    }

    /// Set a single top-level attribute
    pub fn set_attribute(&mut self, name: &str, value: Value) {
        if !self.raw.is_object() {
            self.raw = Value::Object(serde_json::Map::new());
        }
        if let Value::Object(map) = &mut self.raw {
            map.insert(name.to_string(), value);
        }
    }

    /// The raw JSON
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consume into the raw JSON
    pub fn into_raw(self) -> Value {
        self.raw
    }
}

/// Outcome of a refresh
#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult {
    /// The object exists; this is its current state
    Present(State),
    /// The object is gone; the caller drops it from state
    Removed,
}

/// State holding only the import identifier at `attribute`
///
/// The caller follows up with a read to populate the rest.
pub fn import_state_passthrough_id(attribute: &str, id: &str, diags: &mut Diagnostics) -> Option<State> {
    if id.is_empty() {
        diags.add_error(
            "Missing import identifier",
            format!("An identifier is required to import into '{}'", attribute),
        );
        return None;
    }
    let mut state = State::new(Value::Object(serde_json::Map::new()));
    state.set_attribute(attribute, Value::String(id.to_string()));
    Some(state)
}

/// One resource type served by a provider
///
/// Every operation reports problems through `diags` and returns `None` when it
/// could not produce a result.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Shared data handed over by the provider after configure
    type ProviderData: Send + Sync + 'static;

    /// Full type name, given the provider's type name prefix
    fn metadata(&self, provider_type_name: &str) -> String;

    /// Attribute schema
    fn schema(&self) -> Schema;

    /// Receive the configured provider data
    fn configure(&mut self, provider_data: Arc<Self::ProviderData>);

    /// Check a configuration before planning
    fn validate(&self, config: &Value, diags: &mut Diagnostics) {
        self.schema().validate(config, diags);
    }

    /// Create the object described by `plan`
    async fn create(&self, plan: Plan, diags: &mut Diagnostics) -> Option<State>;

    /// Refresh `state` from the remote object
    async fn read(&self, state: State, diags: &mut Diagnostics) -> Option<ReadResult>;

    /// Move the remote object from `prior` to `plan`
    async fn update(&self, plan: Plan, prior: State, diags: &mut Diagnostics) -> Option<State>;

    /// Destroy (or forget) the remote object
    async fn delete(&self, state: State, diags: &mut Diagnostics) -> Option<()>;

    /// Start an import from an identifier
    fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<State> {
        import_state_passthrough_id("id", id, diags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_import_passthrough_sets_id_only() {
        let mut diags = Diagnostics::new();
        let state = import_state_passthrough_id("id", "manager-of", &mut diags).unwrap();
        assert_eq!(state.raw(), &json!({"id": "manager-of"}));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_import_requires_identifier() {
        let mut diags = Diagnostics::new();
        assert!(import_state_passthrough_id("id", "", &mut diags).is_none());
        assert!(diags.has_error());
    }

    #[test]
    fn test_plan_decode_error_is_a_diagnostic() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Model {
            enabled: bool,
        }

        let mut diags = Diagnostics::new();
        let plan = Plan::new(json!({"enabled": "maybe"}));
        assert!(plan.get::<Model>(&mut diags).is_none());
        assert_eq!(diags.errors().next().unwrap().summary, "Unable to decode plan");
    }
}
