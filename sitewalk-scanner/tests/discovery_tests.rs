// Crawl engine tests against a live mock server

use sitewalk_scanner::{CrawlReport, Crawler, ScanError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

fn anchors(links: &[String]) -> String {
    let mut html = String::from("<html><body>");
    for link in links {
        html.push_str(&format!(r#"<a href="{}">{}</a>"#, link, link));
    }
    html.push_str("</body></html>");
    html
}

async fn crawl(seed: &str, concurrency: usize) -> Result<CrawlReport, ScanError> {
    Crawler::with_timeout(5)?
        .with_concurrency(concurrency)
        .discover(seed)
        .await
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_dead_link_on_same_host_is_reported() {
    let server = MockServer::start().await;
    let base = server.uri();
    // Same host as the mock server, but nothing listens on port 9.
    let dead = "http://127.0.0.1:9/gone".to_string();

    mount_page(
        &server,
        "/",
        anchors(&[format!("{base}/alive"), dead.clone()]),
    )
    .await;
    mount_page(&server, "/alive", anchors(&[])).await;

    let report = crawl(&format!("{base}/"), 10).await.unwrap();

    assert!(report.discovered.contains(&dead));
    assert_eq!(report.discovered.len(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, dead);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_site_wide_cycle_terminates() {
    let server = MockServer::start().await;
    let base = server.uri();
    let pages: Vec<String> = (0..20).map(|i| format!("{base}/node{i}")).collect();

    mount_page(&server, "/", anchors(&pages)).await;
    for (i, page) in pages.iter().enumerate() {
        // Every node links to the next one and back to the root.
        let next = pages[(i + 1) % pages.len()].clone();
        let route = page.trim_start_matches(&base).to_string();
        mount_page(&server, &route, anchors(&[next, format!("{base}/")])).await;
    }

    let report = crawl(&format!("{base}/"), 3).await.unwrap();

    assert_eq!(report.discovered.len(), 21);
    assert!(report.failures.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 21, "each page must be requested once");
}

#[tokio::test]
async fn test_seed_with_no_links() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<html><body>nothing</body></html>".to_string()).await;

    let result = crawl(&format!("{}/", server.uri()), 10).await;

    assert!(matches!(result, Err(ScanError::NoLinksFound(_))));
}

#[tokio::test]
async fn test_invalid_seed() {
    let result = crawl("example.com", 10).await;

    assert!(matches!(result, Err(ScanError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_report_serializes() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", anchors(&[format!("{base}/a")])).await;
    mount_page(&server, "/a", anchors(&[])).await;

    let report = crawl(&format!("{base}/"), 10).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["discovered"].as_array().unwrap().len(), 2);
    assert_eq!(json["pages_fetched"], 2);
    assert_eq!(json["truncated"], false);
}
