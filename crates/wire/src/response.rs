// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use bluedim_core::Settings;
use serde::{Deserialize, Serialize};

/// Response from the daemon to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    /// `state` is present only in answer to a read
    Success {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<Settings>,
    },

    /// Generic failure; carries no detail
    Error,
}

impl Response {
    /// Acknowledgment of a write.
    pub fn ok() -> Self {
        Response::Success { state: None }
    }

    pub fn with_state(state: Settings) -> Self {
        Response::Success { state: Some(state) }
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
