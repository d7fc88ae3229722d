use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds the latest value until it has been quiet for `delay`.
///
/// Callers push every change and poll on their tick; a value is released once,
/// and only the final value of a burst is ever released.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self { Self { delay, pending: None } }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Time left until the pending value is released.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self { Self::new(SEARCH_DEBOUNCE) }
}
