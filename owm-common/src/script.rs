//! Papyrus script properties
//!
//! Properties are matched by name case-insensitively, as Papyrus does.

use serde::{Deserialize, Serialize};

use crate::FormKey;

/// Value of a script property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum PropertyValue {
    String(String),
    Int(i32),
    Object(FormKey),
    StructList(Vec<ScriptStruct>),
}

impl PropertyValue {
    fn same_kind(&self, other: &PropertyValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<FormKey> for PropertyValue {
    fn from(value: FormKey) -> Self {
        PropertyValue::Object(value)
    }
}

impl From<Vec<ScriptStruct>> for PropertyValue {
    fn from(value: Vec<ScriptStruct>) -> Self {
        PropertyValue::StructList(value)
    }
}

/// Named property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptProperty {
    pub name: String,
    pub value: PropertyValue,
}

impl ScriptProperty {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One struct of a struct-array property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptStruct {
    #[serde(default)]
    pub members: Vec<ScriptProperty>,
}

/// Script attached to a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<ScriptProperty>,
}

impl ScriptEntry {
    pub fn property(&self, name: &str) -> Option<&ScriptProperty> {
        self.properties
            .iter()
            .find(|prop| prop.name.eq_ignore_ascii_case(name))
    }

    /// Upsert a property
    ///
    /// A string or int property of the same kind is updated in place and
    /// keeps its position and spelling. Anything else (missing property,
    /// different kind, struct lists) removes the old entry and appends a new
    /// one under `name`.
    pub fn set_property(&mut self, name: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        let existing = self
            .properties
            .iter()
            .position(|prop| prop.name.eq_ignore_ascii_case(name));

        if let Some(index) = existing {
            let prop = &mut self.properties[index];
            let scalar = !matches!(value, PropertyValue::StructList(_));
            if scalar && prop.value.same_kind(&value) {
                prop.value = value;
                return;
            }
            self.properties.remove(index);
        }

        self.properties.push(ScriptProperty::new(name, value));
    }
}
