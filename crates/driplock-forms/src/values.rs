//! Form values and error map
//!
//! Transient per-form-instance state. Nothing here is persisted; values are
//! discarded when the owning form closes or resets.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single field's current value. Text inputs and selects carry `Text`;
/// checkboxes carry `Flag`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Flag(_) => "",
        }
    }

    pub fn as_flag(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Text(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Current field values, keyed by field name. Keys are fixed per form;
/// insertion order is irrelevant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormValues(HashMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Text value of a field; missing or checkbox fields read as empty.
    pub fn text(&self, name: &str) -> &str {
        self.0.get(name).map(|v| v.as_text()).unwrap_or("")
    }

    /// Checkbox value of a field; missing or text fields read as unchecked.
    pub fn flag(&self, name: &str) -> bool {
        self.0.get(name).map(|v| v.as_flag()).unwrap_or(false)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

/// Per-field error messages.
///
/// Invariant: a field name appears here if and only if its most recent
/// validation run produced a failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a validation run for one field, inserting on
    /// failure and dropping any stale entry on success.
    pub fn record(&mut self, name: &str, outcome: Option<String>) {
        match outcome {
            Some(message) => {
                self.0.insert(name.to_string(), message);
            }
            None => {
                self.0.remove(name);
            }
        }
    }

    pub fn set(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.0.insert(name.into(), message.into());
    }

    pub fn clear_field(&mut self, name: &str) {
        self.0.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}
