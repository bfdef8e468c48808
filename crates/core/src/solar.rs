// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Solar elevation from the NOAA low-precision solar position equations.
//!
//! Accurate to a fraction of a degree between 1800 and 2100, which is far
//! tighter than the shift window needs.

use chrono::{DateTime, Timelike, Utc};

/// Sun elevation above the horizon in degrees (negative below it).
///
/// Geometric elevation, without atmospheric refraction.
pub fn elevation(latitude: f64, longitude: f64, instant: DateTime<Utc>) -> f64 {
    let julian_day = instant.timestamp() as f64 / 86_400.0 + 2_440_587.5;
    let t = (julian_day - 2_451_545.0) / 36_525.0;

    let mean_long = (280.46646 + t * (36_000.76983 + t * 0.000_303_2)).rem_euclid(360.0);
    let mean_anom = 357.52911 + t * (35_999.05029 - 0.000_153_7 * t);
    let ecc = 0.016_708_634 - t * (0.000_042_037 + 0.000_000_126_7 * t);

    let m = mean_anom.to_radians();
    let center = m.sin() * (1.914_602 - t * (0.004_817 + 0.000_014 * t))
        + (2.0 * m).sin() * (0.019_993 - 0.000_101 * t)
        + (3.0 * m).sin() * 0.000_289;
    let omega = (125.04 - 1934.136 * t).to_radians();
    let apparent_long = mean_long + center - 0.00569 - 0.00478 * omega.sin();

    let mean_obliquity =
        23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0;
    let obliquity = (mean_obliquity + 0.00256 * omega.cos()).to_radians();

    let declination = (obliquity.sin() * apparent_long.to_radians().sin()).asin();

    let y = (obliquity / 2.0).tan().powi(2);
    let l = mean_long.to_radians();
    let eq_of_time = 4.0
        * (y * (2.0 * l).sin() - 2.0 * ecc * m.sin() + 4.0 * ecc * y * m.sin() * (2.0 * l).cos()
            - 0.5 * y * y * (4.0 * l).sin()
            - 1.25 * ecc * ecc * (2.0 * m).sin())
        .to_degrees();

    let minutes = f64::from(instant.num_seconds_from_midnight()) / 60.0;
    let solar_time = (minutes + eq_of_time + 4.0 * longitude).rem_euclid(1440.0);
    let hour_angle = (solar_time / 4.0 - 180.0).to_radians();

    let lat = latitude.to_radians();
    let cos_zenith =
        lat.sin() * declination.sin() + lat.cos() * declination.cos() * hour_angle.cos();
    90.0 - cos_zenith.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
#[path = "solar_tests.rs"]
mod tests;
