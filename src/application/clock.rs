// Clock seam - injected so time-dependent navigation is deterministic in tests
pub trait Clock: Send + Sync {
    /// Current unix time in whole seconds.
    fn now_unix(&self) -> i64;
}
