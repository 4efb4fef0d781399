use dashmap::DashSet;
use tracing::trace;

/// Every URL ever admitted to a crawl run.
///
/// Admission is a single check-and-insert under the owning shard's lock, so two
/// tasks racing on the same URL can never both see themselves as the first.
/// There is no removal: once a URL is in, it stays in for the rest of the run.
#[derive(Debug, Default)]
pub struct DiscoverySet {
    urls: DashSet<String>,
}

impl DiscoverySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` iff this call is the one that added `url`.
    pub fn admit(&self, url: &str) -> bool {
        // Cheap read first; most candidates on a real site are already known.
        if self.urls.contains(url) {
            return false;
        }
        let admitted = self.urls.insert(url.to_string());
        if admitted {
            trace!("Admitted {}", url);
        }
        admitted
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Sorted copy of the set. Only meaningful once no task can admit anymore.
    pub fn snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.urls.iter().map(|u| u.key().clone()).collect();
        urls.sort();
        urls
    }
}
