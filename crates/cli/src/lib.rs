// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bluedim: settings client, foreground controller and CLI commands

pub mod client;
pub mod commands;
pub mod controller;
pub mod exit_error;
pub mod locate;
pub mod output;

#[cfg(test)]
mod test_http;

pub use client::{ClientError, DaemonClient};
pub use controller::{Controller, DisplayBackend, DryRunDisplay, Tick, XrandrDisplay};
pub use exit_error::ExitError;
pub use locate::{Coordinates, LocateError, Locator};
