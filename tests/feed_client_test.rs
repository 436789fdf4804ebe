//! Integration tests for the history feed client against a mock HTTP server

use cycletime::adapters::feed::{FeedClient, PageSource};
use cycletime::config::{parse_config, CycleTimeConfig, FetchConfig};
use cycletime::core::export::ExportCoordinator;
use cycletime::domain::{CycleTimeError, FeedError, Window};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use tokio::sync::watch;

const HISTORY_PATH: &str = r"^/rest-1\.v1/Hist/Story";

fn config(server: &ServerGuard, extra: &str) -> CycleTimeConfig {
    let text = format!(
        "Connection:\n    Domain: {}\n    Username: u\n    Password: p\n{extra}Workflow:\n    Open: Future\n    Active: In Progress\n    Done: Done\n",
        server.url()
    );
    parse_config(&text).unwrap()
}

fn fetch(batch_size: usize) -> FetchConfig {
    FetchConfig {
        batch_size,
        max_tries: 1,
        retry_delay_secs: 0,
        timeout_secs: 5,
    }
}

fn asset(number: &str, status: &str, date: &str) -> Value {
    let oid = format!("Story:{}:1", number.trim_start_matches("S-"));
    json!({
        "_type": "Asset",
        "id": oid,
        "Attributes": {
            "Name": {"value": format!("Story {number}")},
            "Number": {"value": number},
            "Status.Name": {"value": status},
            "ChangeDate": {"value": format!("{date}T10:00:00.000")}
        }
    })
}

fn body(total: usize, assets: Vec<Value>) -> String {
    json!({"_type": "Assets", "total": total, "Assets": assets}).to_string()
}

#[tokio::test]
async fn test_fetch_page_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(HISTORY_PATH.to_string()))
        .match_header("authorization", "Basic dTpw")
        .match_header("accept", "application/json")
        .match_query(Matcher::UrlEncoded("page".into(), "2,0".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body(
            5,
            vec![
                asset("S-100", "Future", "2024-01-01"),
                asset("S-100", "Done", "2024-01-02"),
            ],
        ))
        .create_async()
        .await;

    let client = FeedClient::new(&config(&server, ""), &fetch(2)).unwrap();
    let page = client.fetch_page(Window::new(0, 2)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.total, 5);
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[0].item_id.as_str(), "S-100");
    assert_eq!(page.rows[1].status, "Done");
}

#[tokio::test]
async fn test_filter_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(HISTORY_PATH.to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("where".into(), "Scope.Name='Mobile App'".into()),
            Matcher::UrlEncoded("page".into(), "10,0".into()),
        ]))
        .with_status(200)
        .with_body(body(0, vec![]))
        .create_async()
        .await;

    let config = config(&server, "Criteria:\n    Scopes: Mobile App\n");
    let client = FeedClient::new(&config, &fetch(10)).unwrap();
    let page = client.fetch_page(Window::new(0, 10)).await.unwrap();

    mock.assert_async().await;
    assert!(page.rows.is_empty());
}

#[tokio::test]
async fn test_server_error_is_request_failed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(HISTORY_PATH.to_string()))
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = FeedClient::new(&config(&server, ""), &fetch(10)).unwrap();
    let err = client.fetch_page(Window::new(0, 10)).await.unwrap_err();

    match err {
        FeedError::RequestFailed { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(HISTORY_PATH.to_string()))
        .with_status(200)
        .with_body("<html>login</html>")
        .create_async()
        .await;

    let client = FeedClient::new(&config(&server, ""), &fetch(10)).unwrap();
    let err = client.fetch_page(Window::new(0, 10)).await.unwrap_err();

    assert!(matches!(err, FeedError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_empty_page_inside_feed_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(HISTORY_PATH.to_string()))
        .with_status(200)
        .with_body(body(40, vec![]))
        .create_async()
        .await;

    let client = FeedClient::new(&config(&server, ""), &fetch(10)).unwrap();
    let err = client.fetch_page(Window::new(20, 10)).await.unwrap_err();

    assert!(matches!(err, FeedError::EmptyPage { offset: 20, total: 40 }));
}

#[tokio::test]
async fn test_export_over_http_follows_item_boundaries() {
    let mut server = Server::new_async().await;
    let a1 = asset("S-1", "Future", "2024-01-01");
    let a2 = asset("S-1", "Done", "2024-01-04");
    let b1 = asset("S-2", "Future", "2024-01-02");
    let b2 = asset("S-2", "In Progress", "2024-01-03");
    let b3 = asset("S-2", "Done", "2024-01-05");

    let pages = [
        ("2,0", vec![a1.clone(), a2.clone()]),
        ("4,0", vec![a1, a2, b1.clone(), b2.clone()]),
        ("2,2", vec![b1.clone(), b2.clone()]),
        ("3,2", vec![b1, b2, b3]),
    ];

    let mut mocks = Vec::new();
    for (page, assets) in pages {
        mocks.push(
            server
                .mock("GET", Matcher::Regex(HISTORY_PATH.to_string()))
                .match_query(Matcher::UrlEncoded("page".into(), page.into()))
                .with_status(200)
                .with_body(body(5, assets))
                .expect(1)
                .create_async()
                .await,
        );
    }

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("data.csv");
    let (_tx, rx) = watch::channel(false);

    let coordinator = ExportCoordinator::new(config(&server, ""), fetch(2), rx).unwrap();
    let summary = coordinator.execute_export(&output).await.unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
    assert_eq!(summary.total_rows, 5);
    assert_eq!(summary.pages_fetched, 4);
    assert_eq!(summary.items_written, 2);

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "ID,Link,Name,Open,Active,Done");
    assert_eq!(lines[1], "S-1,1,\"Story S-1\",2024-01-01,,2024-01-04");
    assert_eq!(lines[2], "S-2,2,\"Story S-2\",2024-01-02,2024-01-03,2024-01-05");
}

#[tokio::test]
async fn test_failed_export_writes_nothing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(HISTORY_PATH.to_string()))
        .with_status(503)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("data.json");
    let (_tx, rx) = watch::channel(false);

    let coordinator = ExportCoordinator::new(config(&server, ""), fetch(10), rx).unwrap();
    let err = coordinator.execute_export(&output).await.unwrap_err();

    assert!(matches!(
        err,
        CycleTimeError::RetriesExhausted { attempts: 1, .. }
    ));
    assert!(!output.exists());
}
