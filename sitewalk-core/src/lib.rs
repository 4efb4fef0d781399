pub mod crawl;
pub mod report;

pub use crawl::{CrawlOptions, execute_crawl};
pub use report::{ReportFormat, render_report};
