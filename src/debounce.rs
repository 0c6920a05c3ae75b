//! Debounce timer.
//!
//! Holds at most one pending value with a deadline. A newer value replaces
//! the pending one and re-arms the deadline, so only the last value of a
//! burst is ever emitted. Dropping or cancelling discards what is pending.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the quiet period
    pub fn push(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.delay, value));
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait until the pending value has been quiet for `delay`.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future before it resolves leaves the pending value in place.
    pub async fn settled(&mut self) -> T {
        loop {
            let deadline = match &self.pending {
                Some((deadline, _)) => *deadline,
                None => return std::future::pending().await,
            };
            sleep_until(deadline).await;

            if let Some((_, value)) = self.pending.take() {
                return value;
            }
        }
    }
}
