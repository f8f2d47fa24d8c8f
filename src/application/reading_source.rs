// Reading source seam - how the controller asks for readings
use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::reading::Reading;
use crate::domain::window::Window;

/// Wire variant spoken by the reading source. Selected in configuration,
/// never auto-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// `GET /read?period=...`; responses carry no usable unit and every
    /// reading is kept.
    LegacyPeriodOnly,
    /// `GET /read?start_timestamp=...&period=...`; only Celsius readings
    /// are displayed.
    WindowedCelsius,
}

impl Protocol {
    pub fn query_for(self, window: Window) -> ReadingQuery {
        match self {
            Protocol::LegacyPeriodOnly => ReadingQuery::PeriodOnly {
                period_seconds: window.period_seconds,
            },
            Protocol::WindowedCelsius => ReadingQuery::Windowed {
                start_timestamp: window.start_timestamp,
                period_seconds: window.period_seconds,
            },
        }
    }

    /// Unit a reading must carry to be displayed, if this variant filters
    /// at all. Non-matching readings are dropped, not converted.
    pub fn required_unit(self) -> Option<&'static str> {
        match self {
            Protocol::LegacyPeriodOnly => None,
            Protocol::WindowedCelsius => Some("C"),
        }
    }
}

/// Fetch parameters derived from the window, shaped like the two observed
/// query-string layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingQuery {
    PeriodOnly {
        period_seconds: i64,
    },
    Windowed {
        start_timestamp: i64,
        period_seconds: i64,
    },
}

/// The one failure category a source can report. Transport errors, error
/// statuses and undecodable bodies all collapse here; the controller only
/// ever logs it.
#[derive(Debug, thiserror::Error)]
#[error("reading source failure: {0}")]
pub struct SourceError(String);

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Fetch the readings matching `query`. Result order is not significant.
    async fn fetch_readings(&self, query: ReadingQuery) -> Result<Vec<Reading>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windowed_query_carries_both_fields() {
        let window = Window {
            start_timestamp: 100,
            period_seconds: 3_600,
        };
        assert_eq!(
            Protocol::WindowedCelsius.query_for(window),
            ReadingQuery::Windowed {
                start_timestamp: 100,
                period_seconds: 3_600,
            }
        );
    }

    #[test]
    fn legacy_query_carries_only_the_period() {
        let window = Window {
            start_timestamp: 100,
            period_seconds: 3_600,
        };
        assert_eq!(
            Protocol::LegacyPeriodOnly.query_for(window),
            ReadingQuery::PeriodOnly {
                period_seconds: 3_600,
            }
        );
    }

    #[test]
    fn only_the_windowed_variant_filters_units() {
        assert_eq!(Protocol::WindowedCelsius.required_unit(), Some("C"));
        assert_eq!(Protocol::LegacyPeriodOnly.required_unit(), None);
    }
}
