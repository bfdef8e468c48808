// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bluedim-storage: settings file persistence and port discovery

mod fs;
pub mod ini;
pub mod port;
pub mod store;

pub use port::{PortRegistry, RegistryError};
pub use store::{LoadReport, SettingsStore};
