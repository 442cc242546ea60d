//! Trailing-edge debounce for free-text inputs.
//!
//! Each call to [`Debouncer::schedule`] replaces whatever was pending, so only
//! the last action of a burst runs, `delay` after the burst ends. Only the
//! wait is cancellable: once an action has started it runs to completion and
//! staleness is handled by the request sequencer instead.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period for search and author inputs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A single debounce channel.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Quiet period before a scheduled action fires.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `action` after the quiet period, cancelling any pending action.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detach so that a later schedule() cannot abort a running action.
            tokio::spawn(action);
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(timer);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drop the pending action, if any.
    pub fn cancel(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pending) = pending {
            pending.abort();
            tracing::trace!("Pending debounced action cancelled");
        }
    }

    /// Whether an action is still waiting for its quiet period to end.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    type Action = Pin<Box<dyn Future<Output = ()> + Send>>;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> Action) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let make = move |value: u32| -> Action {
            let sink = Arc::clone(&sink);
            Box::pin(async move {
                sink.lock().unwrap_or_else(PoisonError::into_inner).push(value);
            })
        };
        (fired, make)
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_action_fires_after_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let (fired, make) = recorder();

        debouncer.schedule(make(1));
        assert!(debouncer.is_pending());

        advance(499).await;
        assert!(fired.lock().unwrap_or_else(PoisonError::into_inner).is_empty());

        advance(2).await;
        assert_eq!(*fired.lock().unwrap_or_else(PoisonError::into_inner), vec![1]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_value() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let (fired, make) = recorder();

        debouncer.schedule(make(1));
        advance(100).await;
        debouncer.schedule(make(2));
        advance(100).await;
        debouncer.schedule(make(3));
        advance(400).await;
        debouncer.schedule(make(4));

        advance(499).await;
        assert!(fired.lock().unwrap_or_else(PoisonError::into_inner).is_empty());

        advance(2).await;
        assert_eq!(*fired.lock().unwrap_or_else(PoisonError::into_inner), vec![4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_action() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);

        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        advance(200).await;
        debouncer.cancel();
        advance(1_000).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_action_survives_reschedule() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        debouncer.schedule(async move {
            tokio::time::sleep(Duration::from_millis(1_000)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });
        advance(150).await;

        let counter = Arc::clone(&count);
        debouncer.schedule(async move {
            counter.fetch_add(10, Ordering::SeqCst);
        });
        advance(2_000).await;

        assert_eq!(count.load(Ordering::SeqCst), 11);
    }
}
