// Chart-ready display values
use chrono::{DateTime, Local};

use crate::domain::reading::Reading;

/// A reading transformed for the display surface. The whole sequence is
/// recomputed on every successful fetch, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPoint {
    pub time_label: String,
    pub temperature: f64,
}

impl DisplayPoint {
    pub fn from_reading(reading: &Reading) -> Self {
        Self {
            time_label: time_label(reading.recorded_timestamp),
            temperature: reading.value,
        }
    }
}

/// Local time-of-day label for a unix-seconds timestamp. The timestamp is
/// widened to milliseconds first, matching what the chart axis expects.
pub fn time_label(recorded_timestamp: i64) -> String {
    recorded_timestamp
        .checked_mul(1_000)
        .and_then(DateTime::from_timestamp_millis)
        .map(|t| t.with_timezone(&Local).format("%X").to_string())
        .unwrap_or_else(|| recorded_timestamp.to_string())
}
