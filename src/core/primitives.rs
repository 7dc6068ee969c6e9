use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts fractional unix milliseconds back to an instant.
///
/// Sub-millisecond precision is kept as nanoseconds. Values outside chrono's
/// representable range clamp to its bounds.
#[must_use]
pub fn unix_millis_to_datetime(millis: f64) -> DateTime<Utc> {
    if !millis.is_finite() {
        return if millis.is_sign_negative() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
    }
    let whole = millis.floor();
    let nanos = ((millis - whole) * 1_000_000.0).round() as i64;
    DateTime::from_timestamp_millis(whole as i64)
        .and_then(|time| time.checked_add_signed(TimeDelta::nanoseconds(nanos)))
        .unwrap_or(if millis < 0.0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

#[must_use]
pub fn delta_to_millis(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64
}
