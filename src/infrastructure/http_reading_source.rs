// HTTP reading source - the /read endpoint over reqwest
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::reading_source::{ReadingQuery, ReadingSource, SourceError};
use crate::domain::reading::Reading;
use crate::infrastructure::config::SourceSettings;

pub struct HttpReadingSource {
    http_client: reqwest::Client,
    base_url: String,
}

/// Envelope returned by `/read`. The server also sends `current_timestamp`,
/// which the chart does not consume.
#[derive(Debug, Deserialize)]
struct ReadResponse {
    readings: Vec<Reading>,
}

impl HttpReadingSource {
    pub fn new(settings: &SourceSettings) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn read_url(&self, query: ReadingQuery) -> String {
        match query {
            ReadingQuery::PeriodOnly { period_seconds } => {
                format!("{}/read?period={}", self.base_url, period_seconds)
            }
            ReadingQuery::Windowed {
                start_timestamp,
                period_seconds,
            } => format!(
                "{}/read?start_timestamp={}&period={}",
                self.base_url, start_timestamp, period_seconds
            ),
        }
    }
}

#[async_trait]
impl ReadingSource for HttpReadingSource {
    async fn fetch_readings(&self, query: ReadingQuery) -> Result<Vec<Reading>, SourceError> {
        let url = self.read_url(query);

        // Plain cross-origin GET: no credentials, no custom headers.
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::new(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SourceError::new(format!("HTTP {}", response.status())));
        }

        let body: ReadResponse = response
            .json()
            .await
            .map_err(|e| SourceError::new(format!("failed to parse response: {e}")))?;

        Ok(body.readings)
    }
}
