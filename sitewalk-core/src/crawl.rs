use indicatif::{ProgressBar, ProgressStyle};
use sitewalk_scanner::fetch::DEFAULT_TIMEOUT_SECS;
use sitewalk_scanner::{CrawlReport, Crawler, DEFAULT_CONCURRENCY, ScanError, is_crawlable};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub seed: String,
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub max_pages: Option<usize>,
    pub show_progress: bool,
}

impl CrawlOptions {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_pages: None,
            show_progress: false,
        }
    }
}

/// Callback for reporting each URL as its fetch starts
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Rejects seeds the crawler would never admit.
pub fn validate_seed(seed: &str) -> Result<(), ScanError> {
    if is_crawlable(seed) {
        Ok(())
    } else {
        Err(ScanError::InvalidUrl(seed.to_string()))
    }
}

/// Execute a crawl with the given options
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlReport, ScanError> {
    let CrawlOptions {
        seed,
        concurrency,
        timeout_secs,
        max_pages,
        show_progress,
    } = options;

    validate_seed(&seed)?;

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {}", seed));
        Some(Arc::new(pb))
    } else {
        None
    };

    let started_count = Arc::new(AtomicUsize::new(0));
    let internal_callback: sitewalk_scanner::ProgressCallback = {
        let pb = progress_bar.clone();
        let count = started_count.clone();
        Arc::new(move |url: String| {
            let n = count.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb {
                pb.set_message(format!("Crawling... {} pages requested", n));
            }
            if let Some(ref callback) = progress_callback {
                callback(url);
            }
        })
    };

    let mut crawler = Crawler::with_timeout(timeout_secs)?
        .with_concurrency(concurrency)
        .with_progress_callback(internal_callback);
    if let Some(cap) = max_pages {
        crawler = crawler.with_max_pages(cap);
    }

    info!("Crawling {} (concurrency {})", seed, concurrency);
    let result = crawler.discover(&seed).await;

    if let Some(ref pb) = progress_bar {
        match &result {
            Ok(report) => pb.finish_with_message(format!(
                "Crawl complete! {} URLs discovered",
                report.discovered.len()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    result
}
