// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Night-shift curve and the display appearance it produces.

use crate::defaults::{DISPLAY, NEUTRAL_TEMP, SHIFT};
use crate::settings::Settings;

/// Fraction of the night profile to apply at a given sun elevation.
///
/// 0 at or above `start_angle`, 1 at or below `end_angle`, smoothstep in
/// between. A window with `start_angle <= end_angle` degenerates into a step
/// at `start_angle`.
pub fn night_shift(elevation: f64, start_angle: f64, end_angle: f64) -> f64 {
    if start_angle <= end_angle {
        return if elevation >= start_angle { 0.0 } else { 1.0 };
    }
    let t = ((start_angle - elevation) / (start_angle - end_angle)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Night shift for an elevation using the `shift` section of `settings`.
pub fn night_shift_for(settings: &Settings, elevation: f64) -> f64 {
    night_shift(
        elevation,
        settings.f64_or(SHIFT, "start_angle", 15.0),
        settings.f64_or(SHIFT, "end_angle", -5.0),
    )
}

/// Per-channel gains and brightness to hand to a display backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Blended colour temperature in kelvin
    pub temperature: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    /// 0.0 (black) to 1.0 (undimmed)
    pub brightness: f64,
}

impl Appearance {
    /// Blend the day and night profiles from `settings` by `shift`.
    pub fn blend(settings: &Settings, shift: f64) -> Self {
        let shift = shift.clamp(0.0, 1.0);
        let day = settings.i64_or(DISPLAY, "day_temp", 6000) as f64;
        let night = settings.i64_or(DISPLAY, "night_temp", 4000) as f64;
        let dim = settings.f64_or(DISPLAY, "dim_percent", 0.4);
        let gamma = settings.f64_or(DISPLAY, "gamma", 1.0);

        let temperature = day + (night - day) * shift;
        let cool = (temperature / NEUTRAL_TEMP).clamp(0.0, 1.0);

        Self {
            temperature,
            red: gamma,
            green: cool * gamma,
            blue: cool * gamma,
            brightness: (1.0 - dim * shift).clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
#[path = "shift_tests.rs"]
mod tests;
