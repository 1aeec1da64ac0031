//! Cyclic encoding of periodic calendar and compass values

use std::f64::consts::PI;

/// Period used for the month-of-year encoding
pub const MONTH_PERIOD: f64 = 12.0;

/// Period used for the day-of-year encoding.
///
/// Leap years are not accounted for: day 366 wraps onto day 1. The trained
/// models were fit with this approximation, so it must stay.
pub const DAY_OF_YEAR_PERIOD: f64 = 365.0;

/// Period used for the day-of-week encoding
pub const DAY_OF_WEEK_PERIOD: f64 = 7.0;

/// Map a periodic value onto the unit circle.
///
/// Returns `(sin(2π·value/period), cos(2π·value/period))`. `period` must be
/// non-zero.
pub fn encode_cyclic(value: f64, period: f64) -> (f64, f64) {
    let angle = 2.0 * PI * value / period;
    (angle.sin(), angle.cos())
}

/// Encode a compass direction given in degrees.
pub fn encode_degrees(direction: f64) -> (f64, f64) {
    let radians = direction.to_radians();
    (radians.sin(), radians.cos())
}
