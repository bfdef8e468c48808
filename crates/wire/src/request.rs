// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use bluedim_core::Changes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request from a client to the daemon
///
/// Only a JSON object is a request. Deserialization goes through
/// [`TryFrom<Map>`] so that the sequence form serde's tagged enums would
/// otherwise accept (`["read"]`) is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
#[serde(try_from = "Map<String, Value>")]
pub enum Request {
    /// Full snapshot of the current settings
    Read,

    /// Best-effort merge of `changes`; a missing `changes` field is an
    /// empty change set
    Write {
        #[serde(default)]
        changes: Changes,
    },
}

impl TryFrom<Map<String, Value>> for Request {
    type Error = String;

    fn try_from(mut object: Map<String, Value>) -> Result<Self, Self::Error> {
        match object.get("action").and_then(Value::as_str) {
            Some("read") => Ok(Request::Read),
            Some("write") => {
                let changes = match object.remove("changes") {
                    Some(changes) => {
                        serde_json::from_value(changes).map_err(|e| e.to_string())?
                    }
                    None => Changes::new(),
                };
                Ok(Request::Write { changes })
            }
            Some(other) => Err(format!("unknown action {other:?}")),
            None => Err("missing string field `action`".to_string()),
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
