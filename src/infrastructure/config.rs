use serde::Deserialize;

use crate::application::reading_source::Protocol;
use crate::domain::window::Granularity;

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub source: SourceSettings,
    #[serde(default)]
    pub window: WindowSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    #[serde(default = "default_protocol")]
    pub protocol: Protocol,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowSettings {
    #[serde(default = "default_period_seconds")]
    pub period_seconds: i64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            period_seconds: default_period_seconds(),
        }
    }
}

fn default_protocol() -> Protocol {
    Protocol::WindowedCelsius
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_period_seconds() -> i64 {
    Granularity::Hour.seconds()
}

pub fn load_chart_config() -> anyhow::Result<ChartConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/chart"))
        .build()?;

    let chart_config: ChartConfig = settings.try_deserialize()?;
    if chart_config.window.period_seconds <= 0 {
        anyhow::bail!(
            "window.period_seconds must be positive, got {}",
            chart_config.window.period_seconds
        );
    }
    Ok(chart_config)
}
