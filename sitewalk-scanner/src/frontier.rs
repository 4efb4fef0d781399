use crossbeam_queue::SegQueue;
use tracing::trace;

/// Lock-free FIFO of admitted URLs waiting for a fetch.
///
/// Only URLs that just won admission in the [`DiscoverySet`](crate::DiscoverySet)
/// are pushed, so no URL is queued twice.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: SegQueue<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url: String) {
        trace!("Queued {}", url);
        self.queue.push(url);
    }

    pub fn try_pop(&self) -> Option<String> {
        self.queue.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_fifo_order() {
        let frontier = Frontier::new();
        frontier.push("http://example.com/1".to_string());
        frontier.push("http://example.com/2".to_string());

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.try_pop().as_deref(), Some("http://example.com/1"));
        assert_eq!(frontier.try_pop().as_deref(), Some("http://example.com/2"));
        assert_eq!(frontier.try_pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_concurrent_push_pop_loses_nothing() {
        let frontier = Arc::new(Frontier::new());

        let producers: Vec<_> = (0..4)
            .map(|p| {
                let frontier = frontier.clone();
                std::thread::spawn(move || {
                    for i in 0..250 {
                        frontier.push(format!("http://example.com/{}/{}", p, i));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let frontier = frontier.clone();
                std::thread::spawn(move || {
                    let mut popped = Vec::new();
                    while let Some(url) = frontier.try_pop() {
                        popped.push(url);
                    }
                    popped
                })
            })
            .collect();

        let mut total = 0;
        let mut seen = HashSet::new();
        for consumer in consumers {
            for url in consumer.join().unwrap() {
                total += 1;
                seen.insert(url);
            }
        }

        assert_eq!(total, 1000);
        assert_eq!(seen.len(), 1000);
    }
}
