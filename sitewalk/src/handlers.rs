use crate::commands::command_argument_builder;
use anyhow::{Context, Result};
use clap::ArgMatches;
use clap::error::ErrorKind;
use colored::Colorize;
use sitewalk_core::crawl::{CrawlOptions, execute_crawl};
use sitewalk_core::report::{ReportFormat, render_report};
use sitewalk_scanner::{CrawlReport, ScanError};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const INVALID_URL_MESSAGE: &str = "Invalid URL. Please provide a valid HTTP or HTTPS URL.";
const SEED_FAILED_MESSAGE: &str = "Failed to retrieve HTML content.";
const NO_LINKS_MESSAGE: &str = "No links found in the HTML content.";

/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG` wins
/// over the `-v` count.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Decides the exit status for an argument parsing failure. A wrong number of
/// arguments only prints the usage line and is not treated as an error.
pub fn usage_error_exit_code(error: &clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            0
        }
        ErrorKind::MissingRequiredArgument
        | ErrorKind::UnknownArgument
        | ErrorKind::TooManyValues
        | ErrorKind::WrongNumberOfValues => {
            println!("{}", command_argument_builder().render_usage());
            0
        }
        _ => {
            let _ = error.print();
            2
        }
    }
}

pub fn crawl_options_from_args(matches: &ArgMatches) -> CrawlOptions {
    let seed = matches
        .get_one::<String>("URL")
        .cloned()
        .unwrap_or_default();

    let mut options = CrawlOptions::new(seed);
    if let Some(concurrency) = matches.get_one::<usize>("concurrency") {
        options.concurrency = *concurrency;
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        options.timeout_secs = *timeout;
    }
    options.max_pages = matches.get_one::<usize>("max-pages").copied();
    options.show_progress = !matches.get_flag("quiet") && std::io::stderr().is_terminal();
    options
}

/// Runs the crawl described by `matches` and returns the process exit code.
pub async fn handle_crawl(matches: &ArgMatches) -> i32 {
    let options = crawl_options_from_args(matches);
    let format = matches
        .get_one::<ReportFormat>("format")
        .copied()
        .unwrap_or_default();
    let output = matches.get_one::<PathBuf>("output");

    if options.concurrency == 0 {
        eprintln!("{} Concurrency must be at least 1", "✗".red().bold());
        return 2;
    }

    let report = match execute_crawl(options, None).await {
        Ok(report) => report,
        Err(ScanError::InvalidUrl(_)) => {
            eprintln!("{}", INVALID_URL_MESSAGE);
            return 0;
        }
        Err(ScanError::SeedUnreachable { url, reason }) => {
            warn!("Seed {} could not be fetched: {}", url, reason);
            eprintln!("{}", SEED_FAILED_MESSAGE);
            return 0;
        }
        Err(ScanError::NoLinksFound(_)) => {
            println!("{}", NO_LINKS_MESSAGE);
            return 0;
        }
        Err(e) => {
            eprintln!("{} Crawl failed: {}", "✗".red().bold(), e);
            return 1;
        }
    };

    match write_report(&report, format, output.map(PathBuf::as_path)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            1
        }
    }
}

/// Prints the report, or saves it when `output` is given.
pub fn write_report(report: &CrawlReport, format: ReportFormat, output: Option<&Path>) -> Result<()> {
    let rendered = render_report(report, format).context("Failed to serialize report")?;

    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => {
            print!("{}", rendered);
            if format == ReportFormat::Json {
                println!();
            }
        }
    }
    Ok(())
}
