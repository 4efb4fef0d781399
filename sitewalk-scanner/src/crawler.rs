use crate::error::{Result, ScanError};
use crate::extract::{AnchorExtractor, ExtractLinks, is_crawlable};
use crate::fetch::{DEFAULT_TIMEOUT_SECS, Fetch, HttpFetcher};
use crate::limiter::{ConcurrencyLimiter, DEFAULT_CONCURRENCY};
use crate::result::CrawlReport;
use crate::task::{self, RunState};
use crate::tracker::InFlight;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Called with each URL as its crawl task starts.
pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Orchestrator state. `Running` dispatches work, `Draining` waits for
/// in-flight tasks once the frontier looks empty, `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Running,
    Draining,
    Done,
}

/// Discovers every URL reachable from a seed without leaving the seed's host.
///
/// Each run gets a fresh discovery set and frontier. A task is spawned per URL,
/// bounded by the concurrency limiter, and the run ends once the frontier is
/// empty with nothing in flight.
pub struct Crawler<F = HttpFetcher, E = AnchorExtractor> {
    fetcher: Arc<F>,
    extractor: Arc<E>,
    concurrency: usize,
    max_pages: Option<usize>,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Ok(Self::with_collaborators(
            HttpFetcher::with_timeout(timeout_secs)?,
            AnchorExtractor::new(),
        ))
    }
}

impl<F: Fetch, E: ExtractLinks> Crawler<F, E> {
    pub fn with_collaborators(fetcher: F, extractor: E) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(extractor),
            concurrency: DEFAULT_CONCURRENCY,
            max_pages: None,
            progress_callback: None,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Stops dispatching after `max_pages` pages. URLs already admitted stay
    /// in the result even if they were never fetched.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Fetches `seed`, then crawls every same-host link reachable from it.
    ///
    /// The seed itself is admitted first, so pages linking back to it never
    /// trigger a second fetch.
    pub async fn discover(&self, seed: &str) -> Result<CrawlReport> {
        let started = Instant::now();
        if !is_crawlable(seed) {
            return Err(ScanError::InvalidUrl(seed.to_string()));
        }
        let limiter = ConcurrencyLimiter::new(self.concurrency)?;

        info!(
            "Starting discovery from {} with concurrency {}",
            seed, self.concurrency
        );

        let state = Arc::new(self.new_run());
        state.discovered.admit(seed);
        state.report_progress(seed);

        let body = self
            .fetcher
            .fetch(seed)
            .await
            .map_err(|e| ScanError::SeedUnreachable {
                url: seed.to_string(),
                reason: e.to_string(),
            })?;
        state.fetched.fetch_add(1, Ordering::Relaxed);

        let initial_links = if body.is_empty() {
            Vec::new()
        } else {
            self.extractor.extract_same_host_links(&body, seed)
        };
        if initial_links.is_empty() {
            return Err(ScanError::NoLinksFound(seed.to_string()));
        }

        let queued = state.merge(initial_links);
        debug!("Seed page queued {} links", queued);

        self.drive(state, limiter, started, Some(seed.to_string()))
            .await
    }

    /// Crawls from an already extracted link batch. Entries that are not
    /// `http` URLs are skipped.
    pub async fn discover_from(&self, initial_links: Vec<String>) -> Result<CrawlReport> {
        let started = Instant::now();
        let limiter = ConcurrencyLimiter::new(self.concurrency)?;

        let state = Arc::new(self.new_run());
        let crawlable: Vec<String> = initial_links
            .into_iter()
            .filter(|link| {
                let keep = is_crawlable(link);
                if !keep {
                    warn!("Skipping non-HTTP link {:?}", link);
                }
                keep
            })
            .collect();
        if crawlable.is_empty() {
            return Err(ScanError::NoLinksFound("initial link batch".to_string()));
        }

        info!(
            "Starting discovery from {} links with concurrency {}",
            crawlable.len(),
            self.concurrency
        );
        state.merge(crawlable);

        self.drive(state, limiter, started, None).await
    }

    fn new_run(&self) -> RunState<F, E> {
        RunState::new(
            self.fetcher.clone(),
            self.extractor.clone(),
            self.progress_callback.clone(),
        )
    }

    async fn drive(
        &self,
        state: Arc<RunState<F, E>>,
        limiter: ConcurrencyLimiter,
        started: Instant,
        seed: Option<String>,
    ) -> Result<CrawlReport> {
        let in_flight = InFlight::new();
        let mut phase = CrawlState::Running;
        let mut dispatched = 0usize;

        loop {
            match phase {
                CrawlState::Running => {
                    if self.max_pages.is_some_and(|cap| dispatched >= cap) {
                        phase = transition(phase, CrawlState::Draining);
                        continue;
                    }
                    let Some(url) = state.frontier.try_pop() else {
                        phase = transition(phase, CrawlState::Draining);
                        continue;
                    };

                    let slot = limiter.acquire().await;
                    let guard = in_flight.enter();
                    dispatched += 1;
                    tokio::spawn(task::run(state.clone(), url, slot, guard));
                }
                CrawlState::Draining => {
                    if in_flight.is_idle() {
                        // Every task has merged; nothing else can push now.
                        let capped = self.max_pages.is_some_and(|cap| dispatched >= cap);
                        if state.frontier.is_empty() || capped {
                            phase = transition(phase, CrawlState::Done);
                        } else {
                            phase = transition(phase, CrawlState::Running);
                        }
                    } else {
                        in_flight.wait_for_completion().await;
                        phase = transition(phase, CrawlState::Running);
                    }
                }
                CrawlState::Done => break,
            }
        }

        let mut failures = std::mem::take(&mut *state.failures.lock().await);
        failures.sort_by(|a, b| a.url.cmp(&b.url));

        let report = CrawlReport {
            seed,
            discovered: state.discovered.snapshot(),
            failures,
            pages_fetched: state.fetched.load(Ordering::Relaxed),
            elapsed: started.elapsed(),
            truncated: !state.frontier.is_empty(),
        };

        info!(
            "Discovery complete. {} URLs discovered, {} pages fetched, {} failed",
            report.discovered.len(),
            report.pages_fetched,
            report.failures.len()
        );
        Ok(report)
    }
}

fn transition(from: CrawlState, to: CrawlState) -> CrawlState {
    if from != to {
        debug!("Crawl state {:?} -> {:?}", from, to);
    }
    to
}

impl<F, E> fmt::Debug for Crawler<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crawler")
            .field("concurrency", &self.concurrency)
            .field("max_pages", &self.max_pages)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}
