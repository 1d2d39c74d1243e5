use analysis::run_pipeline;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use commentscope_core::AppConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

fn threads(range: std::ops::Range<usize>) -> Vec<Value> {
    range
        .map(|i| {
            json!({
                "kind": "youtube#commentThread",
                "snippet": {
                    "topLevelComment": {
                        "snippet": {
                            "authorDisplayName": format!("@user{}", i),
                            "textDisplay": "Terrific, really helpful video",
                            "likeCount": i,
                            "publishedAt": "2024-03-01T10:15:00Z"
                        }
                    }
                }
            })
        })
        .collect()
}

/// `full` serves 100 + 5 comments; `broken` serves 50 and then fails.
async fn comment_threads(
    State(seen): State<SeenQueries>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    seen.lock().unwrap().push(params.clone());

    let video = params.get("videoId").map(String::as_str);
    let token = params.get("pageToken").map(String::as_str);
    match (video, token) {
        (Some("full"), None) => (
            StatusCode::OK,
            Json(json!({ "nextPageToken": "T2", "items": threads(0..100) })),
        ),
        (Some("full"), Some("T2")) => (StatusCode::OK, Json(json!({ "items": threads(100..105) }))),
        (Some("broken"), None) => (
            StatusCode::OK,
            Json(json!({ "nextPageToken": "T2", "items": threads(0..50) })),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "code": 500, "message": "backend error" } })),
        ),
    }
}

async fn mock_config(seen: SeenQueries) -> AppConfig {
    let router = Router::new()
        .route("/youtube/v3/commentThreads", get(comment_threads))
        .with_state(seen);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    AppConfig {
        api_key: Some("test-key".to_string()),
        api_base_url: format!("http://{}/youtube/v3", addr),
        request_timeout_secs: 5,
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn test_two_http_pages_are_fetched_and_scored() {
    let seen: SeenQueries = Arc::default();
    let config = mock_config(seen.clone()).await;

    let report = run_pipeline("https://www.youtube.com/watch?v=full&t=42", &config)
        .await
        .unwrap();

    assert_eq!(report.fetched_message(), "Total comments fetched: 105");
    assert_eq!(report.pages_fetched, 2);
    assert!(!report.is_truncated());
    assert_eq!(report.records[104].author, "@user104");
    assert!(report.records.iter().all(|record| record.polarity > 0.0));
    assert!(report.summary.unwrap().verdict.is_useful());

    let queries = seen.lock().unwrap();
    assert_eq!(queries.len(), 2);
    for query in queries.iter() {
        assert_eq!(query.get("key").map(String::as_str), Some("test-key"));
        assert_eq!(query.get("videoId").map(String::as_str), Some("full"));
        assert_eq!(query.get("part").map(String::as_str), Some("snippet"));
        assert_eq!(query.get("textFormat").map(String::as_str), Some("plainText"));
        assert_eq!(query.get("maxResults").map(String::as_str), Some("100"));
    }
    assert!(!queries[0].contains_key("pageToken"));
    assert_eq!(queries[1].get("pageToken").map(String::as_str), Some("T2"));
}

#[tokio::test]
async fn test_server_error_on_second_page_keeps_first_page() {
    let seen: SeenQueries = Arc::default();
    let config = mock_config(seen.clone()).await;

    let report = run_pipeline("https://www.youtube.com/watch?v=broken", &config)
        .await
        .unwrap();

    assert_eq!(report.total_fetched(), 50);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.fetch_error.as_deref(), Some("HTTP Error: 500"));
    assert!(report.summary.is_some());
    assert_eq!(seen.lock().unwrap().len(), 2);
}
