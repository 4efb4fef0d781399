use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").unwrap_or_else(|e| panic!("invalid anchor selector: {}", e))
});

/// Turns a page body into the links worth following.
pub trait ExtractLinks: Send + Sync + 'static {
    /// Absolute URLs in `body` that share `origin`'s host. Never called with an
    /// empty body.
    fn extract_same_host_links(&self, body: &str, origin: &str) -> Vec<String>;
}

/// Only `http`-prefixed strings are ever admitted to a crawl. Relative and
/// scheme-relative links fail this check.
pub fn is_crawlable(url: &str) -> bool {
    url.starts_with("http")
}

/// Extracts `<a href="...">` targets with an HTML tokenizer.
///
/// Links are kept verbatim: no resolution against the page, no normalization,
/// no fragment stripping. A candidate that cannot be parsed or has no host is
/// dropped with a log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorExtractor;

impl AnchorExtractor {
    pub fn new() -> Self {
        Self
    }

    fn host_of(url: &str) -> Option<String> {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

impl ExtractLinks for AnchorExtractor {
    fn extract_same_host_links(&self, body: &str, origin: &str) -> Vec<String> {
        let Some(base_host) = Self::host_of(origin) else {
            warn!("Skipping extraction for {}: no host", origin);
            return Vec::new();
        };

        let document = Html::parse_document(body);
        let mut links = Vec::new();

        for element in document.select(&ANCHOR_SELECTOR) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if !is_crawlable(href) {
                continue;
            }

            match Self::host_of(href) {
                Some(host) if host == base_host => links.push(href.to_string()),
                Some(_) => {}
                None => debug!("Skipping malformed link {:?} on {}", href, origin),
            }
        }

        links
    }
}
