// Terminal chart - plain-text rendering of the display series
use std::io::{self, Write};

use chrono::{DateTime, Local};

use crate::application::display_surface::DisplaySurface;
use crate::domain::display::DisplayPoint;
use crate::domain::window::{Granularity, Window};

const BAR_WIDTH: usize = 40;

/// Redraws the whole series on every replacement. Visual styling is kept
/// minimal: one line per point with a proportional bar, plus a toolbar line
/// showing the window start and the active granularity preset in bold.
pub struct TerminalChart;

impl DisplaySurface for TerminalChart {
    fn render(&self, window: Window, points: &[DisplayPoint]) {
        let mut stdout = io::stdout().lock();
        if let Err(err) = draw(&mut stdout, window, points) {
            tracing::warn!(error = %err, "failed to draw chart");
        }
    }
}

fn draw(out: &mut impl Write, window: Window, points: &[DisplayPoint]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Temperature Over Time")?;
    writeln!(out, "{}", toolbar(window))?;

    if points.is_empty() {
        writeln!(out, "  (no readings in this window)")?;
        return Ok(());
    }

    let min = points
        .iter()
        .map(|p| p.temperature)
        .fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|p| p.temperature)
        .fold(f64::NEG_INFINITY, f64::max);

    for point in points {
        writeln!(
            out,
            "  {:>10}  {:>7.2}  {}",
            point.time_label,
            point.temperature,
            bar(point.temperature, min, max)
        )?;
    }
    Ok(())
}

fn toolbar(window: Window) -> String {
    let start = DateTime::from_timestamp(window.start_timestamp, 0)
        .map(|t| t.with_timezone(&Local).format("%c").to_string())
        .unwrap_or_else(|| window.start_timestamp.to_string());

    let active = Granularity::from_seconds(window.period_seconds);
    let presets = Granularity::ALL
        .into_iter()
        .map(|granularity| {
            if active == Some(granularity) {
                format!("\x1b[1m{}\x1b[0m", granularity.label())
            } else {
                granularity.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!("from {start}  [{presets}]")
}

fn bar(value: f64, min: f64, max: f64) -> String {
    let span = max - min;
    let filled = if span <= f64::EPSILON {
        BAR_WIDTH / 2
    } else {
        (((value - min) / span) * BAR_WIDTH as f64).round() as usize
    };
    "#".repeat(filled.clamp(1, BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::display::time_label;

    fn drawn(window: Window, points: &[DisplayPoint]) -> String {
        let mut buffer = Vec::new();
        draw(&mut buffer, window, points).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn draws_one_line_per_point() {
        let window = Window {
            start_timestamp: 1_000,
            period_seconds: 3_600,
        };
        let points = vec![
            DisplayPoint {
                time_label: time_label(1_060),
                temperature: 20.0,
            },
            DisplayPoint {
                time_label: time_label(1_120),
                temperature: 22.5,
            },
        ];
        let output = drawn(window, &points);
        assert!(output.contains(&time_label(1_060)));
        assert!(output.contains("22.50"));
        assert!(output.contains('#'));
    }

    #[test]
    fn empty_series_renders_an_empty_chart() {
        let window = Window {
            start_timestamp: 1_000,
            period_seconds: 3_600,
        };
        assert!(drawn(window, &[]).contains("(no readings in this window)"));
    }

    #[test]
    fn toolbar_bolds_the_active_preset() {
        let window = Window {
            start_timestamp: 1_000,
            period_seconds: 86_400,
        };
        let line = toolbar(window);
        assert!(line.contains("\x1b[1mDay\x1b[0m"));
        assert!(!line.contains("\x1b[1mHour"));
    }

    #[test]
    fn toolbar_handles_a_non_preset_period() {
        let window = Window {
            start_timestamp: 1_000,
            period_seconds: 1_234,
        };
        let line = toolbar(window);
        assert!(!line.contains("\x1b[1m"));
    }

    #[test]
    fn bars_scale_between_min_and_max() {
        assert_eq!(bar(10.0, 10.0, 20.0), "#");
        assert_eq!(bar(20.0, 10.0, 20.0), "#".repeat(BAR_WIDTH));
        assert_eq!(bar(21.5, 21.5, 21.5), "#".repeat(BAR_WIDTH / 2));
    }
}
