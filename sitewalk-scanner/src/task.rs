use crate::crawler::ProgressCallback;
use crate::discovery::DiscoverySet;
use crate::extract::ExtractLinks;
use crate::fetch::Fetch;
use crate::frontier::Frontier;
use crate::limiter::Slot;
use crate::result::FetchFailure;
use crate::tracker::InFlightGuard;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// State shared by the orchestrator and every task of one crawl run.
pub(crate) struct RunState<F, E> {
    pub(crate) fetcher: Arc<F>,
    pub(crate) extractor: Arc<E>,
    pub(crate) discovered: DiscoverySet,
    pub(crate) frontier: Frontier,
    pub(crate) failures: Mutex<Vec<FetchFailure>>,
    pub(crate) fetched: AtomicUsize,
    pub(crate) progress_callback: Option<ProgressCallback>,
}

impl<F: Fetch, E: ExtractLinks> RunState<F, E> {
    pub(crate) fn new(
        fetcher: Arc<F>,
        extractor: Arc<E>,
        progress_callback: Option<ProgressCallback>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            discovered: DiscoverySet::new(),
            frontier: Frontier::new(),
            failures: Mutex::new(Vec::new()),
            fetched: AtomicUsize::new(0),
            progress_callback,
        }
    }

    /// Admits each candidate and queues the ones that were new. Returns how
    /// many were queued.
    pub(crate) fn merge(&self, links: Vec<String>) -> usize {
        let mut queued = 0;
        for link in links {
            if self.discovered.admit(&link) {
                self.frontier.push(link);
                queued += 1;
            }
        }
        queued
    }

    pub(crate) fn report_progress(&self, url: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(url.to_string());
        }
    }
}

/// One unit of crawl work: fetch `url`, extract its links, merge the new ones.
///
/// The slot and the guard are released only after the merge, so the
/// orchestrator cannot see "nothing in flight" while this task still has
/// URLs to queue.
pub(crate) async fn run<F: Fetch, E: ExtractLinks>(
    state: Arc<RunState<F, E>>,
    url: String,
    slot: Slot,
    guard: InFlightGuard,
) {
    crawl_page(&state, &url).await;

    drop(slot);
    drop(guard);
}

async fn crawl_page<F: Fetch, E: ExtractLinks>(state: &RunState<F, E>, url: &str) {
    state.report_progress(url);

    let body = match state.fetcher.fetch(url).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Failed to retrieve {}: {}", url, e);
            state.failures.lock().await.push(FetchFailure {
                url: url.to_string(),
                error: e.to_string(),
            });
            return;
        }
    };
    state.fetched.fetch_add(1, Ordering::Relaxed);

    if body.is_empty() {
        debug!("Empty body from {}", url);
        return;
    }

    let links = state.extractor.extract_same_host_links(&body, url);
    let found = links.len();
    let queued = state.merge(links);
    debug!("{}: {} same-host links, {} new", url, found, queued);
}
