//! Duration arithmetic on decimal hours.
//!
//! Course and split-part durations are decimal hours rounded to two
//! places (1.5 = one hour thirty minutes). The UI edits them as an
//! hours/minutes pair, so every comparison against a declared total
//! goes through [`approx_eq`] rather than exact float equality.

/// Tolerance for comparing decimal-hour totals.
///
/// Two decimal places of precision means sums of converted
/// hours/minutes pairs can drift by just under a hundredth.
pub const DURATION_TOLERANCE: f64 = 0.01;

/// Round a decimal-hours value to two places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert decimal hours into an (hours, minutes) pair.
///
/// Minutes are rounded to the nearest whole minute. When rounding
/// produces 60 minutes, the value carries into the next hour so the
/// minutes component is always in `0..60`.
#[must_use]
pub fn to_hours_minutes(decimal: f64) -> (u32, u32) {
    let hours = decimal.floor() as u32;
    let minutes = ((decimal - f64::from(hours)) * 60.0).round() as u32;
    if minutes == 60 {
        (hours + 1, 0)
    } else {
        (hours, minutes)
    }
}

/// Convert an (hours, minutes) pair into decimal hours, rounded to
/// two places.
#[must_use]
pub fn from_hours_minutes(hours: u32, minutes: u32) -> f64 {
    round2(f64::from(hours) + f64::from(minutes) / 60.0)
}

/// Compare two decimal-hour values within [`DURATION_TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < DURATION_TOLERANCE
}
