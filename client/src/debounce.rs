//! Search input debouncing on the tokio clock.

use std::time::Duration;

use tokio::time::Instant;

/// Quiescence window applied to search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds the latest input until it has been left alone for `window`.
///
/// Every [`push`](Debouncer::push) restarts the window. The event loop sleeps
/// until [`deadline`](Debouncer::deadline) and then calls
/// [`take_settled`](Debouncer::take_settled).
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Debouncer that releases a value once it has been left alone for `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace the pending value and restart the window.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.window));
    }

    /// When the pending value settles, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Whether a value is waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its window has elapsed at `now`.
    pub fn take_settled(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(&self.pending, Some((_, deadline)) if *deadline <= now);
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Wait for the pending value to settle.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future before it resolves leaves the pending value in place.
    pub async fn settled(&mut self) -> T {
        loop {
            match self.deadline() {
                Some(deadline) => {
                    tokio::time::sleep_until(deadline).await;
                    if let Some(value) = self.take_settled(Instant::now()) {
                        return value;
                    }
                },
                None => std::future::pending::<()>().await,
            }
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
