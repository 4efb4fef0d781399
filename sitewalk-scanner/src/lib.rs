pub mod crawler;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod limiter;
pub mod result;
mod task;
pub mod tracker;

pub use crawler::{CrawlState, Crawler, ProgressCallback};
pub use discovery::DiscoverySet;
pub use error::{Result, ScanError};
pub use extract::{AnchorExtractor, ExtractLinks, is_crawlable};
pub use fetch::{Fetch, HttpFetcher};
pub use frontier::Frontier;
pub use limiter::{ConcurrencyLimiter, DEFAULT_CONCURRENCY, Slot};
pub use result::{CrawlReport, FetchFailure};
pub use tracker::{InFlight, InFlightGuard};
