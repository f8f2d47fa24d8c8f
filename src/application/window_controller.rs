// Window controller - owns the query window and keeps fetches in order
use std::sync::{Arc, Mutex};

use crate::application::clock::Clock;
use crate::application::display_surface::DisplaySurface;
use crate::application::reading_source::{Protocol, ReadingSource};
use crate::domain::display::DisplayPoint;
use crate::domain::reading::Reading;
use crate::domain::window::{Granularity, Window};

/// Maintains the current query window, refetches on every change, and
/// replaces the display series wholesale when a fetch lands. Methods take
/// `&self`, so callers may spawn navigation calls; when fetches overlap,
/// the generation guard makes the latest window win regardless of which
/// response arrives first.
pub struct WindowController {
    source: Arc<dyn ReadingSource>,
    clock: Arc<dyn Clock>,
    surface: Arc<dyn DisplaySurface>,
    protocol: Protocol,
    state: Mutex<ControllerState>,
}

struct ControllerState {
    window: Window,
    generation: u64,
    points: Vec<DisplayPoint>,
}

/// Snapshot handed to an in-flight fetch. `generation` decides whether the
/// response may still be applied when it arrives.
#[derive(Debug, Clone, Copy)]
struct FetchTicket {
    window: Window,
    generation: u64,
}

impl WindowController {
    /// The initial window covers the `period_seconds` leading up to now.
    pub fn new(
        source: Arc<dyn ReadingSource>,
        clock: Arc<dyn Clock>,
        surface: Arc<dyn DisplaySurface>,
        protocol: Protocol,
        period_seconds: i64,
    ) -> Self {
        let window = Window::ending_at(clock.now_unix(), period_seconds);
        Self {
            source,
            clock,
            surface,
            protocol,
            state: Mutex::new(ControllerState {
                window,
                generation: 0,
                points: Vec::new(),
            }),
        }
    }

    pub fn window(&self) -> Window {
        self.state.lock().unwrap().window
    }

    pub fn display_points(&self) -> Vec<DisplayPoint> {
        self.state.lock().unwrap().points.clone()
    }

    /// Pan one period into the past. The start never goes below zero.
    pub async fn shift_backward(&self) {
        let ticket = self.advance(Window::shifted_backward);
        self.run_fetch(ticket).await;
    }

    /// Pan one period into the future, with no clamp at "now".
    pub async fn shift_forward(&self) {
        let ticket = self.advance(Window::shifted_forward);
        self.run_fetch(ticket).await;
    }

    /// Re-anchor the window start at the current time, keeping the period.
    pub async fn jump_to_now(&self) {
        let now = self.clock.now_unix();
        let ticket = self.advance(move |window| window.anchored_at(now));
        self.run_fetch(ticket).await;
    }

    /// Change the window length. The start stays exactly where it is, even
    /// when that leaves the window far in the past; see `Window::with_period`.
    /// Non-positive periods are ignored.
    pub async fn set_period(&self, period_seconds: i64) {
        if period_seconds <= 0 {
            tracing::warn!(period_seconds, "ignoring non-positive period");
            return;
        }
        let ticket = self.advance(move |window| window.with_period(period_seconds));
        self.run_fetch(ticket).await;
    }

    pub async fn set_granularity(&self, granularity: Granularity) {
        self.set_period(granularity.seconds()).await;
    }

    /// Fetch again for the current window without changing it. Runs once at
    /// startup and backs the manual refresh control.
    pub async fn refresh(&self) {
        let ticket = {
            let state = self.state.lock().unwrap();
            FetchTicket {
                window: state.window,
                generation: state.generation,
            }
        };
        self.run_fetch(ticket).await;
    }

    fn advance(&self, transition: impl FnOnce(Window) -> Window) -> FetchTicket {
        let (ticket, points) = {
            let mut state = self.state.lock().unwrap();
            state.window = transition(state.window);
            state.generation += 1;
            (
                FetchTicket {
                    window: state.window,
                    generation: state.generation,
                },
                state.points.clone(),
            )
        };
        // The window readout updates immediately; the data catches up when
        // the fetch lands.
        self.surface.render(ticket.window, &points);
        ticket
    }

    async fn run_fetch(&self, ticket: FetchTicket) {
        let query = self.protocol.query_for(ticket.window);
        match self.source.fetch_readings(query).await {
            Ok(readings) => self.apply(ticket, readings),
            Err(err) => {
                // The previous series stays on display; the next navigation
                // is the only retry.
                tracing::warn!(error = %err, "fetch failed, keeping previous readings");
            }
        }
    }

    fn apply(&self, ticket: FetchTicket, mut readings: Vec<Reading>) {
        if let Some(unit) = self.protocol.required_unit() {
            readings.retain(|reading| reading.unit.as_deref() == Some(unit));
        }
        readings.sort_by_key(|reading| reading.recorded_timestamp);
        let points: Vec<DisplayPoint> = readings.iter().map(DisplayPoint::from_reading).collect();

        let window = {
            let mut state = self.state.lock().unwrap();
            if state.generation != ticket.generation {
                tracing::debug!(
                    fetched = ticket.generation,
                    current = state.generation,
                    "discarding readings for a superseded window"
                );
                return;
            }
            state.points = points.clone();
            state.window
        };
        self.surface.render(window, &points);
    }
}
