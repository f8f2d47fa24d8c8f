// Readings server - in-memory development stand-in for the probe-monitoring API
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

const DEFAULT_PERIOD_SECONDS: i64 = 600;
const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone, Serialize)]
struct SensorReading {
    sensor: String,
    unit: String,
    value: f64,
    recorded_timestamp: i64,
    received_timestamp: i64,
}

/// What probes upload. `received_timestamp` is stamped server-side at ingest.
#[derive(Debug, Deserialize)]
struct SensorReadingPayload {
    sensor: String,
    unit: String,
    value: f64,
    recorded_timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct ReadParams {
    start_timestamp: Option<i64>,
    #[serde(default = "default_period")]
    period: i64,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_period() -> i64 {
    DEFAULT_PERIOD_SECONDS
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Default)]
struct ReadingStore {
    readings: Mutex<Vec<SensorReading>>,
}

impl ReadingStore {
    fn ingest(&self, payloads: Vec<SensorReadingPayload>, received_timestamp: i64) -> usize {
        let mut readings = self.readings.lock().unwrap();
        let accepted = payloads.len();
        for payload in payloads {
            readings.push(SensorReading {
                sensor: payload.sensor,
                unit: payload.unit,
                value: payload.value,
                recorded_timestamp: payload.recorded_timestamp,
                received_timestamp,
            });
        }
        accepted
    }

    /// Readings recorded in `[start, start + period)`, oldest first, capped
    /// at `limit`. Without an explicit start the window trails `now`.
    fn window(
        &self,
        start_timestamp: Option<i64>,
        period: i64,
        limit: usize,
        now: i64,
    ) -> Vec<SensorReading> {
        let start = start_timestamp.unwrap_or_else(|| (now - period).max(0));
        let end = start.saturating_add(period.max(0));

        let mut matched: Vec<SensorReading> = self
            .readings
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.recorded_timestamp >= start && r.recorded_timestamp < end)
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.recorded_timestamp);
        matched.truncate(limit);
        matched
    }
}

async fn health_check() -> &'static str {
    "ok"
}

/// Probes send batches of readings here. The response carries the current
/// time so probes without a clock battery can sync up.
async fn sensor_event(
    State(store): State<Arc<ReadingStore>>,
    Json(payloads): Json<Vec<SensorReadingPayload>>,
) -> Json<serde_json::Value> {
    let now = Utc::now().timestamp();
    let accepted = store.ingest(payloads, now);
    tracing::debug!(accepted, "stored readings");
    Json(json!({
        "description": "ok",
        "accepted": accepted,
        "current_timestamp": now,
    }))
}

async fn get_readings(
    State(store): State<Arc<ReadingStore>>,
    Query(params): Query<ReadParams>,
) -> Json<serde_json::Value> {
    let now = Utc::now().timestamp();
    let readings = store.window(params.start_timestamp, params.period, params.limit, now);
    Json(json!({
        "readings": readings,
        "current_timestamp": now,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let store = Arc::new(ReadingStore::default());

    // The chart client fetches cross-origin, so CORS stays wide open.
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/sense", post(sensor_event))
        .route("/read", get(get_readings))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store);

    let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
    println!("Starting readings server on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
