// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed setting values.
//!
//! Every option carries exactly one of four kinds. The kind of an option is
//! fixed by its schema default and never changes at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single setting value.
///
/// Serialized untagged so that JSON `6000`, `0.4`, `true` and `"HDMI-1"`
/// map directly onto the matching variant. Variant order matters for
/// deserialization: integers must be tried before floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// The kind of a [`Value`], used for schema type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
        };
        f.write_str(name)
    }
}

/// Errors from parsing or validating a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("expected {expected}, got {text:?}")]
    Parse { expected: ValueKind, text: String },

    #[error("float value must be finite")]
    NonFinite,

    #[error("string value cannot contain line breaks or surrounding whitespace")]
    Unpersistable,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
        }
    }

    /// Parse the text form of a value as the given kind.
    ///
    /// Booleans accept `true/false`, `yes/no`, `on/off` and `1/0` in any case.
    pub fn parse_as(kind: ValueKind, text: &str) -> Result<Value, ValueError> {
        let parse_err = || ValueError::Parse { expected: kind, text: text.to_string() };
        let trimmed = text.trim();
        let value = match kind {
            ValueKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Value::Bool(true),
                "false" | "no" | "off" | "0" => Value::Bool(false),
                _ => return Err(parse_err()),
            },
            ValueKind::Int => Value::Int(trimmed.parse().map_err(|_| parse_err())?),
            ValueKind::Float => Value::Float(trimmed.parse().map_err(|_| parse_err())?),
            ValueKind::Str => Value::Str(trimmed.to_string()),
        };
        value.validate()?;
        Ok(value)
    }

    /// Convert a JSON scalar into a value.
    ///
    /// Returns `None` for `null`, arrays, objects and integers outside the
    /// `i64` range.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) if n.is_f64() => n.as_f64().map(Value::Float),
            serde_json::Value::Number(n) => n.as_i64().map(Value::Int),
            serde_json::Value::String(s) => Some(Value::Str(s.clone())),
            _ => None,
        }
    }

    /// Check that the value survives a write/read cycle through the
    /// settings file.
    pub fn validate(&self) -> Result<(), ValueError> {
        match self {
            Value::Float(f) if !f.is_finite() => Err(ValueError::NonFinite),
            Value::Str(s) if s.contains(['\n', '\r']) || s.trim() != s => {
                Err(ValueError::Unpersistable)
            }
            _ => Ok(()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// The text form written to the settings file.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
