// Main entry point - dependency injection and the control loop
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::window_controller::WindowController;
use crate::domain::window::Granularity;
use crate::infrastructure::config::load_chart_config;
use crate::infrastructure::http_reading_source::HttpReadingSource;
use crate::infrastructure::system_clock::SystemClock;
use crate::presentation::terminal_chart::TerminalChart;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let chart_config = load_chart_config()?;

    // Create the reading source (infrastructure layer)
    let source = Arc::new(HttpReadingSource::new(&chart_config.source));

    // Create the controller (application layer)
    let controller = Arc::new(WindowController::new(
        source,
        Arc::new(SystemClock),
        Arc::new(TerminalChart),
        chart_config.source.protocol,
        chart_config.window.period_seconds,
    ));

    println!("Temperature chart, reading from {}", chart_config.source.base_url);
    println!("commands: back, forward, now, hour, day, week, refresh, status, quit");

    controller.refresh().await;

    // Navigation commands are spawned so a slow fetch never blocks input;
    // the controller's generation guard sorts out overlapping completions.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim().to_ascii_lowercase();
        let controller = controller.clone();
        match command.as_str() {
            "" => {}
            "b" | "back" => {
                tokio::spawn(async move { controller.shift_backward().await });
            }
            "f" | "forward" => {
                tokio::spawn(async move { controller.shift_forward().await });
            }
            "n" | "now" => {
                tokio::spawn(async move { controller.jump_to_now().await });
            }
            "h" | "hour" => {
                tokio::spawn(async move { controller.set_granularity(Granularity::Hour).await });
            }
            "d" | "day" => {
                tokio::spawn(async move { controller.set_granularity(Granularity::Day).await });
            }
            "w" | "week" => {
                tokio::spawn(async move { controller.set_granularity(Granularity::Week).await });
            }
            "r" | "refresh" => {
                tokio::spawn(async move { controller.refresh().await });
            }
            "s" | "status" => {
                let window = controller.window();
                println!(
                    "window start={} period={}s points={}",
                    window.start_timestamp,
                    window.period_seconds,
                    controller.display_points().len()
                );
            }
            "q" | "quit" => break,
            other => println!("unknown command: {other}"),
        }
    }

    Ok(())
}
