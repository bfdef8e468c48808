// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The application's settings schema.

use crate::settings::Schema;

pub const DISPLAY: &str = "display";
pub const SHIFT: &str = "shift";
pub const LOCATION: &str = "location";
pub const CONTROLLER: &str = "controller";

/// Colour temperature of an unshifted display, in kelvin.
pub const NEUTRAL_TEMP: f64 = 6500.0;

/// Schema the daemon is started with.
pub fn default_schema() -> Schema {
    Schema::builder()
        .option(DISPLAY, "day_temp", 6000)
        .option(DISPLAY, "night_temp", 4000)
        .option(DISPLAY, "dim_percent", 0.4)
        .option(DISPLAY, "gamma", 1.0)
        .option(DISPLAY, "output", "")
        .option(SHIFT, "start_angle", 15.0)
        .option(SHIFT, "end_angle", -5.0)
        .option(LOCATION, "latitude", 0.0)
        .option(LOCATION, "longitude", 0.0)
        .option(LOCATION, "auto", true)
        .option(CONTROLLER, "enabled", true)
        .option(CONTROLLER, "interval_secs", 60)
        .build()
}
