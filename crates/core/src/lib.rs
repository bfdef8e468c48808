// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bluedim-core: settings types and display math shared by the daemon and its clients

pub mod clock;
pub mod defaults;
pub mod settings;
pub mod shift;
pub mod solar;
pub mod value;

pub use clock::{Clock, FakeClock, SystemClock};
pub use defaults::{default_schema, NEUTRAL_TEMP};
pub use settings::{Changes, Schema, SchemaBuilder, Section, Settings};
pub use shift::{night_shift, night_shift_for, Appearance};
pub use value::{Value, ValueError, ValueKind};
