// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use crate::client::ClientError;

/// Generic failure
pub const EXIT_FAILURE: i32 = 1;
/// Bad arguments (also what clap exits with)
pub const EXIT_USAGE: i32 = 2;
/// No daemon answered
pub const EXIT_UNAVAILABLE: i32 = 3;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }
}

impl From<ClientError> for ExitError {
    fn from(e: ClientError) -> Self {
        let code = if e.is_unavailable() { EXIT_UNAVAILABLE } else { EXIT_FAILURE };
        Self::new(code, e.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
