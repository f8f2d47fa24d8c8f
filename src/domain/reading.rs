// Sensor reading as returned by the reading source
use serde::Deserialize;

/// One observation from the wire. Legacy sources omit the unit entirely.
/// Readings arrive as an unordered set; ordering is the consumer's problem.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reading {
    pub recorded_timestamp: i64,
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
}
