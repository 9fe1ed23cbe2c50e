//! # Debounce
//!
//! A `Debouncer` owns at most one pending timer. Each `call()` aborts the
//! pending one and schedules a fresh one, so the callback only runs once the
//! input has been quiet for `delay`. Dropping the debouncer aborts whatever
//! is still pending.
//!
//! Must be used from within a tokio runtime.

use std::time::Duration;

use log::debug;
use tokio::task::AbortHandle;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct Debouncer {
    delay: Duration,
    pending: Option<AbortHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `f` after the quiet period, replacing any pending call.
    pub fn call<F>(&mut self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });
        self.pending = Some(handle.abort_handle());
    }

    /// Abort the pending call, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take()
            && !handle.is_finished()
        {
            debug!("Debounce timer reset");
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
