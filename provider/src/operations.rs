//! Field tables and patch operation diffing
//!
//! Each resource model declares its attributes once, in a [`Field`] table. The
//! table order is the schema order and the order in which patch operations are
//! emitted. Schema generation, diffing and unknown-value resolution all walk the
//! same table.

use pingdirectory_client::Operation;
use plugin_framework::{AttrValue, Attribute, AttributeType, Schema};
use std::collections::BTreeSet;
use std::fmt;

type StringSet = BTreeSet<String>;

/// How an attribute may be set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// The object identifier; required, immutable and never patched
    Identifier,
    Required,
    Optional,
    /// Optional; the server supplies a default when unset
    OptionalComputed,
    /// Read-only, reported by the server
    Computed,
}

impl FieldMode {
    /// True when a change to this field is sent to the server
    pub fn is_patchable(&self) -> bool {
        matches!(self, FieldMode::Required | FieldMode::Optional | FieldMode::OptionalComputed)
    }
}

enum Accessor<M> {
    String(fn(&M) -> &AttrValue<String>, fn(&mut M) -> &mut AttrValue<String>),
    Bool(fn(&M) -> &AttrValue<bool>, fn(&mut M) -> &mut AttrValue<bool>),
    Int64(fn(&M) -> &AttrValue<i64>, fn(&mut M) -> &mut AttrValue<i64>),
    StringSet(fn(&M) -> &AttrValue<StringSet>, fn(&mut M) -> &mut AttrValue<StringSet>),
}

/// One attribute of a resource model
pub struct Field<M> {
    pub name: &'static str,
    pub mode: FieldMode,
    pub description: &'static str,
    pub allowed_values: Option<&'static [&'static str]>,
    accessor: Accessor<M>,
}

impl<M> fmt::Debug for Field<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("type", &self.attribute_type())
            .finish()
    }
}

impl<M> Field<M> {
    /// Configuration property name used in patch paths (`join_dn_attribute` → `join-dn-attribute`)
    pub fn path(&self) -> String {
        self.name.replace('_', "-")
    }

    pub fn attribute_type(&self) -> AttributeType {
        match self.accessor {
            Accessor::String(..) => AttributeType::String,
            Accessor::Bool(..) => AttributeType::Bool,
            Accessor::Int64(..) => AttributeType::Int64,
            Accessor::StringSet(..) => AttributeType::StringSet,
        }
    }

    /// Schema attribute for this field
    pub fn attribute(&self) -> Attribute {
        let attribute_type = self.attribute_type();
        let mut attribute = match self.mode {
            FieldMode::Identifier => Attribute::required(self.name, attribute_type).requires_replace(),
            FieldMode::Required => Attribute::required(self.name, attribute_type),
            FieldMode::Optional => Attribute::optional(self.name, attribute_type),
            FieldMode::OptionalComputed => Attribute::optional_computed(self.name, attribute_type),
            FieldMode::Computed => Attribute::computed(self.name, attribute_type),
        }
        .with_description(self.description);
        if let Some(values) = self.allowed_values {
            attribute = attribute.with_allowed_values(values);
        }
        attribute
    }
}

/// Builder for a model's field table
pub struct FieldTable<M> {
    fields: Vec<Field<M>>,
}

impl<M> fmt::Debug for FieldTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

impl<M> Default for FieldTable<M> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<M> FieldTable<M> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, name: &'static str, mode: FieldMode, accessor: Accessor<M>) -> Self {
        self.fields.push(Field { name, mode, description: "", allowed_values: None, accessor });
        self
    }

    pub fn string(
        self,
        name: &'static str,
        mode: FieldMode,
        get: fn(&M) -> &AttrValue<String>,
        get_mut: fn(&mut M) -> &mut AttrValue<String>,
    ) -> Self {
        self.push(name, mode, Accessor::String(get, get_mut))
    }

    pub fn bool(
        self,
        name: &'static str,
        mode: FieldMode,
        get: fn(&M) -> &AttrValue<bool>,
        get_mut: fn(&mut M) -> &mut AttrValue<bool>,
    ) -> Self {
        self.push(name, mode, Accessor::Bool(get, get_mut))
    }

    pub fn int64(
        self,
        name: &'static str,
        mode: FieldMode,
        get: fn(&M) -> &AttrValue<i64>,
        get_mut: fn(&mut M) -> &mut AttrValue<i64>,
    ) -> Self {
        self.push(name, mode, Accessor::Int64(get, get_mut))
    }

    pub fn string_set(
        self,
        name: &'static str,
        mode: FieldMode,
        get: fn(&M) -> &AttrValue<StringSet>,
        get_mut: fn(&mut M) -> &mut AttrValue<StringSet>,
    ) -> Self {
        self.push(name, mode, Accessor::StringSet(get, get_mut))
    }

    /// Describe the most recently added field
    pub fn describe(mut self, description: &'static str) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.description = description;
        }
        self
    }

    /// Restrict the most recently added field to an enumeration
    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.allowed_values = Some(values);
        }
        self
    }

    pub fn build(self) -> Vec<Field<M>> {
        self.fields
    }
}

/// Resource schema generated from a field table
pub fn schema_from_fields<M>(description: impl Into<String>, fields: &[Field<M>]) -> Schema {
    fields
        .iter()
        .fold(Schema::new(description), |schema, field| schema.with_attribute(field.attribute()))
}

/// Ordered patch operations moving `state` to `plan`
///
/// Identifier and computed-only fields are skipped, as are plan values that are
/// still unknown.
pub fn diff_operations<M>(fields: &[Field<M>], plan: &M, state: &M) -> Vec<Operation> {
    let mut operations = Vec::new();
    for field in fields.iter().filter(|f| f.mode.is_patchable()) {
        let path = field.path();
        match &field.accessor {
            Accessor::String(get, _) => diff_string(&path, get(plan), get(state), &mut operations),
            Accessor::Bool(get, _) => diff_scalar(&path, get(plan), get(state), &mut operations),
            Accessor::Int64(get, _) => diff_scalar(&path, get(plan), get(state), &mut operations),
            Accessor::StringSet(get, _) => diff_set(&path, get(plan), get(state), &mut operations),
        }
    }
    operations
}

// Empty and null strings are the same unset value.
fn diff_string(path: &str, plan: &AttrValue<String>, state: &AttrValue<String>, operations: &mut Vec<Operation>) {
    if plan.is_unknown() {
        return;
    }
    match (plan.non_empty(), state.non_empty()) {
        (Some(planned), current) if current != Some(planned) => operations.push(Operation::replace(path, planned)),
        (None, Some(_)) => operations.push(Operation::remove(path)),
        _ => {}
    }
}

fn diff_scalar<T: PartialEq + ToString>(
    path: &str,
    plan: &AttrValue<T>,
    state: &AttrValue<T>,
    operations: &mut Vec<Operation>,
) {
    match plan {
        AttrValue::Unknown => {}
        AttrValue::Known(planned) => {
            if state.known() != Some(planned) {
                operations.push(Operation::replace(path, planned.to_string()));
            }
        }
        AttrValue::Null => {
            if state.is_known() {
                operations.push(Operation::remove(path));
            }
        }
    }
}

// One add per new element, then one remove per dropped element.
fn diff_set(path: &str, plan: &AttrValue<StringSet>, state: &AttrValue<StringSet>, operations: &mut Vec<Operation>) {
    if plan.is_unknown() {
        return;
    }
    let empty = StringSet::new();
    let planned = plan.known().unwrap_or(&empty);
    let current = state.known().unwrap_or(&empty);

    operations.extend(planned.difference(current).map(|value| Operation::add(path, value.as_str())));
    operations.extend(current.difference(planned).map(|value| Operation::remove_value(path, value.as_str())));
}

/// Replace every unknown value in `plan` with the value from `prior`
pub fn resolve_unknowns<M>(fields: &[Field<M>], plan: &mut M, prior: &M) {
    for field in fields {
        match &field.accessor {
            Accessor::String(get, get_mut) => resolve(get_mut(plan), get(prior)),
            Accessor::Bool(get, get_mut) => resolve(get_mut(plan), get(prior)),
            Accessor::Int64(get, get_mut) => resolve(get_mut(plan), get(prior)),
            Accessor::StringSet(get, get_mut) => resolve(get_mut(plan), get(prior)),
        }
    }
}

fn resolve<T: Clone>(slot: &mut AttrValue<T>, prior: &AttrValue<T>) {
    if slot.is_unknown() {
        *slot = prior.clone();
    }
}
