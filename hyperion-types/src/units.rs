//! Display helpers for oracle readings.

use chrono::DateTime;

/// Miles per hour in one metre per second, as used on report displays.
pub const MPH_PER_MS: f64 = 2.237;

/// Convert a wind speed from m/s to mph.
#[must_use]
pub fn ms_to_mph(wind_speed_ms: f64) -> f64 {
    wind_speed_ms * MPH_PER_MS
}

/// Render a Unix timestamp (seconds) as a long-form UTC date.
///
/// Returns `None` for timestamps outside the representable range.
///
/// ```
/// use hyperion_types::format_timestamp;
///
/// assert_eq!(
///     format_timestamp(1_699_564_800).as_deref(),
///     Some("November 9, 2023, 09:20 PM UTC"),
/// );
/// ```
#[must_use]
pub fn format_timestamp(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%B %-d, %Y, %I:%M %p UTC").to_string())
}
