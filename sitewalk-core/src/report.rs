// Report rendering for finished crawls

use serde::{Deserialize, Serialize};
use sitewalk_scanner::CrawlReport;
use std::fmt;
use std::str::FromStr;

/// Frames the URL list in text reports.
pub const SEPARATOR: &str = "------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("Unknown report format '{}'", other)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

pub fn render_report(report: &CrawlReport, format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => render_json(report),
    }
}

/// Sorted URL list between separator lines, then failures (if any) and the
/// elapsed time in whole seconds.
pub fn render_text(report: &CrawlReport) -> String {
    let mut out = String::new();
    out.push_str(SEPARATOR);
    out.push('\n');
    for url in &report.discovered {
        out.push_str(url);
        out.push('\n');
    }
    out.push_str(SEPARATOR);
    out.push('\n');

    if !report.failures.is_empty() {
        out.push_str(&format!(
            "Failed to retrieve {} page(s):\n",
            report.failures.len()
        ));
        for failure in &report.failures {
            out.push_str(&format!("  {}: {}\n", failure.url, failure.error));
        }
    }
    if report.truncated {
        out.push_str("Page limit reached; some discovered URLs were not fetched.\n");
    }

    out.push_str(&format!(
        "Time spent: {} seconds\n",
        report.elapsed.as_secs()
    ));
    out
}

pub fn render_json(report: &CrawlReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
