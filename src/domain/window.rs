// Window domain model - the queried time range and its navigation rules

/// The time range the chart is looking at. Navigation replaces the whole
/// value; the pair never changes one field at a time mid-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Unix seconds, never negative.
    pub start_timestamp: i64,
    /// Length of the window in seconds, always positive.
    pub period_seconds: i64,
}

impl Window {
    /// Window covering the `period_seconds` leading up to `end`.
    pub fn ending_at(end: i64, period_seconds: i64) -> Self {
        Self {
            start_timestamp: (end - period_seconds).max(0),
            period_seconds,
        }
    }

    /// One period into the past, clamped at the epoch.
    pub fn shifted_backward(self) -> Self {
        Self {
            start_timestamp: (self.start_timestamp - self.period_seconds).max(0),
            ..self
        }
    }

    /// One period into the future. There is no upper clamp; a window past
    /// "now" just comes back empty or partial from the source.
    pub fn shifted_forward(self) -> Self {
        Self {
            start_timestamp: self.start_timestamp.saturating_add(self.period_seconds),
            ..self
        }
    }

    /// Re-anchor the start at `now`, keeping the period.
    pub fn anchored_at(self, now: i64) -> Self {
        Self {
            start_timestamp: now.max(0),
            ..self
        }
    }

    /// Same start, different period. The start is deliberately not
    /// re-aligned: switching from hour to week while panned into the past
    /// keeps the window in the past.
    pub fn with_period(self, period_seconds: i64) -> Self {
        Self {
            period_seconds,
            ..self
        }
    }
}

/// The granularity presets offered by the UI. Other positive periods are
/// accepted by the controller; these are just the named ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hour,
    Day,
    Week,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Hour, Granularity::Day, Granularity::Week];

    pub fn seconds(self) -> i64 {
        match self {
            Granularity::Hour => 3_600,
            Granularity::Day => 86_400,
            Granularity::Week => 604_800,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Hour => "Hour",
            Granularity::Day => "Day",
            Granularity::Week => "Week",
        }
    }

    pub fn from_seconds(seconds: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.seconds() == seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backward_then_forward_is_a_round_trip() {
        for granularity in Granularity::ALL {
            let window = Window {
                start_timestamp: 2_000_000,
                period_seconds: granularity.seconds(),
            };
            assert_eq!(window.shifted_backward().shifted_forward(), window);
        }
    }

    #[test]
    fn round_trip_overshoots_across_the_zero_clamp() {
        let window = Window {
            start_timestamp: 1_000,
            period_seconds: 3_600,
        };
        let back = window.shifted_backward();
        assert_eq!(back.start_timestamp, 0);
        assert_eq!(back.shifted_forward().start_timestamp, 3_600);
    }

    #[test]
    fn backward_at_zero_is_idempotent() {
        let window = Window {
            start_timestamp: 0,
            period_seconds: 86_400,
        };
        assert_eq!(window.shifted_backward(), window);
        assert_eq!(window.shifted_backward().shifted_backward(), window);
    }

    #[test]
    fn forward_is_unbounded() {
        let window = Window {
            start_timestamp: 10_000,
            period_seconds: 3_600,
        };
        assert_eq!(window.shifted_forward().start_timestamp, 13_600);
    }

    #[test]
    fn with_period_preserves_the_start() {
        let window = Window {
            start_timestamp: 1_000,
            period_seconds: 3_600,
        };
        let widened = window.with_period(86_400);
        assert_eq!(widened.start_timestamp, 1_000);
        assert_eq!(widened.period_seconds, 86_400);
    }

    #[test]
    fn ending_at_clamps_near_the_epoch() {
        let window = Window::ending_at(1_000, 3_600);
        assert_eq!(window.start_timestamp, 0);

        let window = Window::ending_at(10_000, 3_600);
        assert_eq!(window.start_timestamp, 6_400);
    }

    #[test]
    fn preset_lookup_by_seconds() {
        assert_eq!(Granularity::from_seconds(3_600), Some(Granularity::Hour));
        assert_eq!(Granularity::from_seconds(604_800), Some(Granularity::Week));
        assert_eq!(Granularity::from_seconds(1_234), None);
    }
}
