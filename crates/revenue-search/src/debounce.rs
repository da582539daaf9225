//! Cancellable debounced task scheduling

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Runs at most one scheduled task per quiescence window
///
/// Scheduling replaces any task that has not fired yet. Once the window
/// elapses the task is detached into its own tokio task, so a later
/// `schedule` or `cancel` never interrupts work that already started.
/// Dropping the debouncer cancels whatever is still pending.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `task` to run once the window elapses without another call
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            tokio::spawn(task);
        });

        if let Some(previous) = self.lock().replace(timer) {
            if !previous.is_finished() {
                debug!("debounce timer reset");
            }
            previous.abort();
        }
    }

    /// Cancel the pending task, if any
    ///
    /// Returns `true` when a not-yet-fired task was cancelled. Safe to call
    /// when nothing is scheduled.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(timer) => {
                let was_pending = !timer.is_finished();
                timer.abort();
                if was_pending {
                    debug!("debounced task cancelled");
                }
                was_pending
            }
            None => false,
        }
    }

    /// Whether a scheduled task is still waiting for its window
    pub fn is_pending(&self) -> bool {
        self.lock().as_ref().is_some_and(|timer| !timer.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn bump(count: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let count = Arc::clone(count);
        async move {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_window() {
        let fired = counter();
        let debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(bump(&fired));
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(299)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_resets_window() {
        let first = counter();
        let second = counter();
        let debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(bump(&first));
        sleep(Duration::from_millis(200)).await;
        debouncer.schedule(bump(&second));

        // 400ms after the first call, 200ms after the second
        sleep(Duration::from_millis(200)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(101)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let fired = counter();
        let debouncer = Debouncer::new(Duration::from_millis(300));

        assert!(!debouncer.cancel());
        debouncer.schedule(bump(&fired));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        sleep(Duration::from_secs(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending() {
        let fired = counter();
        let debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(bump(&fired));
        drop(debouncer);

        sleep(Duration::from_secs(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fired_task_survives_reschedule() {
        let finished = counter();
        let debouncer = Debouncer::new(Duration::from_millis(100));

        let done = Arc::clone(&finished);
        debouncer.schedule(async move {
            sleep(Duration::from_millis(500)).await;
            done.fetch_add(1, Ordering::SeqCst);
        });

        // The first task is now running its own 500ms of work
        sleep(Duration::from_millis(150)).await;
        debouncer.schedule(async {});
        assert!(debouncer.cancel());

        sleep(Duration::from_secs(1)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }
}
