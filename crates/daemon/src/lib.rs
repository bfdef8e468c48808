// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! BlueDim settings daemon library
//!
//! Exposes startup and the listener so the `bluedimd` binary and in-process
//! tests run the same daemon, plus the environment lookups clients share.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod listener;
pub mod logging;

pub use lifecycle::{startup, Config, DaemonState, LifecycleError, StartupResult};
pub use listener::{ListenCtx, Listener};
