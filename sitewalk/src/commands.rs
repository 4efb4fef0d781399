use clap::{arg, value_parser};
use sitewalk_core::ReportFormat;
use std::path::PathBuf;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitewalk")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitewalk")
        .about("Discover every page reachable from a seed URL without leaving its host")
        .styles(CLAP_STYLING)
        .arg(
            arg!(<URL>)
                .help("The seed URL to start crawling from (must start with http)"),
        )
        .arg(
            arg!(-c --"concurrency" <NUM>)
                .required(false)
                .help("Maximum number of pages fetched at the same time")
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Per-request timeout in seconds")
                .value_parser(value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(-m --"max-pages" <NUM>)
                .required(false)
                .help("Stop fetching after this many pages (default: no limit)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json")
                .value_parser(value_parser!(ReportFormat))
                .default_value("text"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Save report to file (default: display to screen)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(-q --"quiet" "Suppress the progress spinner").required(false))
        .arg(
            arg!(-v --"verbose" ... "Increase log output (-v info, -vv debug, -vvv trace)")
                .required(false),
        )
}
