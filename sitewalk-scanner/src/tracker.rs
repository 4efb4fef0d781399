use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Counts crawl tasks that have started but not yet finished merging their
/// discoveries, and wakes the orchestrator each time one of them finishes.
///
/// This is the join barrier for termination: the orchestrator never needs to
/// keep task handles around, it only needs `count() == 0` with an empty
/// frontier.
#[derive(Debug, Default)]
pub struct InFlight {
    count: AtomicUsize,
    finished: Notify,
}

/// Held by a running task. Dropping it marks the task finished.
#[derive(Debug)]
pub struct InFlightGuard {
    tracker: Arc<InFlight>,
}

impl InFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers a task. Must be called before the task is spawned.
    pub fn enter(self: &Arc<Self>) -> InFlightGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            tracker: Arc::clone(self),
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn is_idle(&self) -> bool {
        self.count() == 0
    }

    /// Resolves after some task finishes. A finish that lands between a
    /// `count()` check and this call is not lost: `notify_one` stores a permit
    /// when nobody is waiting yet.
    pub async fn wait_for_completion(&self) {
        self.finished.notified().await;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.tracker.count.fetch_sub(1, Ordering::SeqCst);
        self.tracker.finished.notify_one();
    }
}
