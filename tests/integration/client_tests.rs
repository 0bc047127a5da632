use std::time::Duration;

use httpmock::prelude::*;
use intellirank::api::{RankingService, SearchRequest};
use intellirank::error::{ErrorKind, IrError};
use serde_json::json;

use crate::common::{client_for, result_json};

#[tokio::test]
async fn test_health_reports_document_count() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .json_body(json!({ "status": "ok", "document_count": 1042 }));
        })
        .await;

    let report = client_for(&server.base_url()).health().await.unwrap();
    mock.assert_async().await;
    assert!(report.is_ok());
    assert_eq!(report.document_count, Some(1042));
}

#[tokio::test]
async fn test_health_without_count() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({ "status": "ok" }));
        })
        .await;

    let report = client_for(&server.base_url()).health().await.unwrap();
    assert!(report.is_ok());
    assert_eq!(report.document_count, None);
}

#[tokio::test]
async fn test_slow_health_probe_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({ "status": "ok", "document_count": 1 }));
        })
        .await;

    let err = client_for(&server.base_url()).health().await.unwrap_err();
    assert!(matches!(err, IrError::Timeout(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Unavailable);
}

#[tokio::test]
async fn test_categories_ignore_extra_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categories");
            then.status(200).json_body(json!({
                "categories": ["Technology", "Products"],
                "subcategories": { "Technology": ["Backend"], "Products": ["Audio"] },
                "total_documents": 240,
            }));
        })
        .await;

    let categories = client_for(&server.base_url()).categories().await.unwrap();
    mock.assert_async().await;
    assert_eq!(categories, vec!["Technology", "Products"]);
}

#[tokio::test]
async fn test_subcategories_encode_category() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/subcategories")
                .query_param("category", "Home & Garden");
            then.status(200)
                .json_body(json!({ "subcategories": ["Kitchen", "Outdoor"] }));
        })
        .await;

    let subcategories = client_for(&server.base_url())
        .subcategories("Home & Garden")
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(subcategories, vec!["Kitchen", "Outdoor"]);
}

#[tokio::test]
async fn test_search_sends_null_filters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/search").json_body(json!({
                "query": "python",
                "top_n": 10,
                "category": null,
                "subcategory": null,
            }));
            then.status(200).json_body(json!({
                "query": "python",
                "results": [result_json(1, "Flask Basics", false)],
            }));
        })
        .await;

    let request = SearchRequest {
        query: "python".to_string(),
        top_n: 10,
        category: None,
        subcategory: None,
    };
    let results = client_for(&server.base_url()).search(&request).await.unwrap();
    mock.assert_async().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Flask Basics");
    assert_eq!(results[0].difficulty_level.as_deref(), Some("Beginner"));
    assert_eq!(results[0].brand, None);
}

#[tokio::test]
async fn test_server_error_is_classified() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categories");
            then.status(500).body("internal error");
        })
        .await;

    let err = client_for(&server.base_url()).categories().await.unwrap_err();
    match &err {
        IrError::Http { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("expected http error, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Server);
}

#[tokio::test]
async fn test_malformed_body_is_classified() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categories");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let err = client_for(&server.base_url()).categories().await.unwrap_err();
    assert!(matches!(err, IrError::MalformedResponse(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[tokio::test]
async fn test_refused_connection_is_unavailable() {
    let err = client_for("http://127.0.0.1:9")
        .categories()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
}
