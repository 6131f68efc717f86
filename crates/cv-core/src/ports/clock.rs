pub trait ClockPort: Send + Sync {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;
}
