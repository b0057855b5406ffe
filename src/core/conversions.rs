//! Conversion utilities from provider wire values into crate types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Convert a provider float into a `Decimal`, or `None` if it is not finite.
///
/// Goes through a fixed-precision string to avoid carrying binary float noise
/// (e.g. `0.1 + 0.2`) into decimal values.
#[must_use]
pub fn f64_to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&format!("{value:.8}"))
        .ok()
        .map(|d| d.normalize())
}

/// Convert a provider timestamp in epoch milliseconds into a UTC instant.
///
/// CoinGecko occasionally sends the millisecond value as a float.
#[must_use]
pub fn millis_to_datetime(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    DateTime::from_timestamp_millis(ms.round() as i64)
}

/// Parse an RFC 3339 string into a UTC instant.
#[must_use]
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
