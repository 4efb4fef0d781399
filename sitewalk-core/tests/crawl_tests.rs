// Tests for crawl execution

use sitewalk_core::crawl::{CrawlOptions, execute_crawl};
use sitewalk_scanner::ScanError;
use std::sync::{Arc, Mutex};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn serve(server: &MockServer, route: &str, body: String) {
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

#[tokio::test]
async fn test_execute_crawl_collects_site() {
    let server = MockServer::start().await;
    let base = server.uri();
    serve(
        &server,
        "/",
        format!(r#"<a href="{base}/a">a</a><a href="{base}/b">b</a>"#),
    )
    .await;
    serve(&server, "/a", format!(r#"<a href="{base}/c">c</a>"#)).await;
    serve(&server, "/b", "<p>leaf</p>".to_string()).await;
    serve(&server, "/c", "<p>leaf</p>".to_string()).await;

    let mut options = CrawlOptions::new(format!("{base}/"));
    options.concurrency = 2;

    let report = execute_crawl(options, None).await.unwrap();

    assert_eq!(report.discovered.len(), 4);
    assert_eq!(report.discovered[3], format!("{base}/c"));
}

#[tokio::test]
async fn test_execute_crawl_forwards_progress() {
    let server = MockServer::start().await;
    let base = server.uri();
    serve(&server, "/", format!(r#"<a href="{base}/a">a</a>"#)).await;
    serve(&server, "/a", "<p>leaf</p>".to_string()).await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let callback = Arc::new(move |url: String| {
        seen_clone.lock().unwrap().push(url);
    });

    execute_crawl(CrawlOptions::new(format!("{base}/")), Some(callback))
        .await
        .unwrap();

    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_execute_crawl_honours_page_cap() {
    let server = MockServer::start().await;
    let base = server.uri();
    let links: String = (0..5)
        .map(|i| format!(r#"<a href="{base}/p{i}">p</a>"#))
        .collect();
    serve(&server, "/", links).await;
    for i in 0..5 {
        serve(&server, &format!("/p{i}"), "<p>leaf</p>".to_string()).await;
    }

    let mut options = CrawlOptions::new(format!("{base}/"));
    options.max_pages = Some(2);

    let report = execute_crawl(options, None).await.unwrap();

    assert_eq!(report.pages_fetched, 3);
    assert!(report.truncated);
}

#[tokio::test]
async fn test_execute_crawl_rejects_relative_seed() {
    let result = execute_crawl(CrawlOptions::new("/index.html"), None).await;
    assert!(matches!(result, Err(ScanError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_execute_crawl_unreachable_seed() {
    let mut options = CrawlOptions::new("http://127.0.0.1:9/");
    options.timeout_secs = 2;

    let result = execute_crawl(options, None).await;

    assert!(matches!(result, Err(ScanError::SeedUnreachable { .. })));
}
