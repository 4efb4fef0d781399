pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    crawl_options_from_args, handle_crawl, init_logging, usage_error_exit_code, write_report,
};

// Re-export crawl functionality from sitewalk-core
pub use sitewalk_core::crawl::{CrawlOptions, execute_crawl};
pub use sitewalk_core::report::{ReportFormat, render_report};
