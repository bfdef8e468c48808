// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settings state, schema and change sets.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::value::{Value, ValueKind};

/// Options of one section, in declaration order.
pub type Section = IndexMap<String, Value>;

/// Section → option → value.
///
/// Serializes as a plain nested JSON object, which is also the shape of the
/// `state` field of a read response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(IndexMap<String, Section>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, section: &str, option: &str) -> Option<&Value> {
        self.0.get(section).and_then(|s| s.get(option))
    }

    pub fn section(&self, section: &str) -> Option<&Section> {
        self.0.get(section)
    }

    /// Insert or replace a value, creating the section if needed.
    pub fn insert(&mut self, section: &str, option: &str, value: impl Into<Value>) {
        self.0.entry(section.to_string()).or_default().insert(option.to_string(), value.into());
    }

    /// Apply one change if the option exists and the kind matches.
    ///
    /// Returns true when the stored value was replaced.
    pub fn apply(&mut self, section: &str, option: &str, value: &Value) -> bool {
        match self.get_mut(section, option) {
            Some(current) if current.kind() == value.kind() && value.validate().is_ok() => {
                *current = value.clone();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn get_mut(&mut self, section: &str, option: &str) -> Option<&mut Value> {
        self.0.get_mut(section).and_then(|s| s.get_mut(option))
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.0.iter().map(|(name, section)| (name.as_str(), section))
    }

    /// Every `(section, option, value)` triple in order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
        self.0.iter().flat_map(|(section, options)| {
            options.iter().map(move |(option, value)| (section.as_str(), option.as_str(), value))
        })
    }

    /// The `(section, option)` key set, in order.
    pub fn keys(&self) -> Vec<(String, String)> {
        self.entries().map(|(s, o, _)| (s.to_string(), o.to_string())).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|s| s.is_empty())
    }

    pub fn f64_or(&self, section: &str, option: &str, default: f64) -> f64 {
        self.get(section, option).and_then(Value::as_f64).unwrap_or(default)
    }

    pub fn i64_or(&self, section: &str, option: &str, default: i64) -> i64 {
        self.get(section, option).and_then(Value::as_i64).unwrap_or(default)
    }

    pub fn bool_or(&self, section: &str, option: &str, default: bool) -> bool {
        self.get(section, option).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn str_or<'a>(&'a self, section: &str, option: &str, default: &'a str) -> &'a str {
        self.get(section, option).and_then(Value::as_str).unwrap_or(default)
    }
}

/// The legal sections and options with their typed defaults.
///
/// Immutable once built; the daemon holds one for its whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    defaults: Settings,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// A fresh state holding every default.
    pub fn defaults(&self) -> Settings {
        self.defaults.clone()
    }

    pub fn kind_of(&self, section: &str, option: &str) -> Option<ValueKind> {
        self.defaults.get(section, option).map(Value::kind)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.defaults.section(section).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
        self.defaults.entries()
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    defaults: Settings,
}

impl SchemaBuilder {
    pub fn option(mut self, section: &str, option: &str, default: impl Into<Value>) -> Self {
        self.defaults.insert(section, option, default);
        self
    }

    pub fn build(self) -> Schema {
        Schema { defaults: self.defaults }
    }
}

/// A proposed partial update: section → option → value.
///
/// Deserialization is lenient. Anything that is not an object of objects of
/// scalars is dropped instead of failing the whole request, since unknown or
/// mistyped entries are skipped at apply time anyway.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Changes(IndexMap<String, Section>);

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, section: &str, option: &str, value: impl Into<Value>) -> Self {
        self.0.entry(section.to_string()).or_default().insert(option.to_string(), value.into());
        self
    }

    pub fn from_json(json: &serde_json::Value) -> Self {
        let mut changes = Changes::new();
        let Some(sections) = json.as_object() else {
            return changes;
        };
        for (section, options) in sections {
            let Some(options) = options.as_object() else {
                continue;
            };
            for (option, value) in options {
                if let Some(value) = Value::from_json(value) {
                    changes = changes.set(section, option, value);
                }
            }
        }
        changes
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
        self.0.iter().flat_map(|(section, options)| {
            options.iter().map(move |(option, value)| (section.as_str(), option.as_str(), value))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|s| s.is_empty())
    }
}

impl<'de> Deserialize<'de> for Changes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(Changes::from_json(&json))
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
