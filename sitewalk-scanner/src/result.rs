use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub url: String,
    pub error: String,
}

/// Outcome of one crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Set when the run started from a single seed page.
    pub seed: Option<String>,
    /// Every admitted URL, sorted.
    pub discovered: Vec<String>,
    /// URLs whose fetch failed, sorted by URL. They are also in `discovered`.
    pub failures: Vec<FetchFailure>,
    pub pages_fetched: usize,
    pub elapsed: Duration,
    /// The page cap stopped dispatch while URLs were still queued.
    pub truncated: bool,
}

impl CrawlReport {
    pub fn new(seed: Option<String>) -> Self {
        Self {
            seed,
            discovered: Vec::new(),
            failures: Vec::new(),
            pages_fetched: 0,
            elapsed: Duration::from_secs(0),
            truncated: false,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}
