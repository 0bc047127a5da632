use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use intellirank::api::{HttpRankingClient, RankingService};
use intellirank::session::{ALL, Phase, ResultsView, SEARCH_FAILED_MESSAGE, SessionSettings};
use intellirank::shell::Shell;
use serde_json::json;
use tokio::time::Instant;

use crate::common::{config_for, result_json};

fn shell_for(server: &MockServer) -> Shell<HttpRankingClient> {
    let config = config_for(&server.base_url());
    let client = HttpRankingClient::from_config(&config).unwrap();
    Shell::new(Arc::new(client), SessionSettings::from_config(&config))
}

/// Apply completions until `done` holds or `deadline` passes.
async fn drive_until<S, F>(shell: &mut Shell<S>, deadline: Duration, done: F) -> bool
where
    S: RankingService,
    F: Fn(&Shell<S>) -> bool,
{
    let started = Instant::now();
    while !done(shell) {
        let Some(remaining) = deadline.checked_sub(started.elapsed()) else {
            return false;
        };
        shell.step(remaining).await;
    }
    true
}

async fn mock_catalogs(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categories");
            then.status(200)
                .json_body(json!({ "categories": ["Technology", "Products"] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/subcategories")
                .query_param("category", ALL);
            then.status(200)
                .json_body(json!({ "subcategories": ["Backend", "Audio"] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/subcategories")
                .query_param("category", "Technology");
            then.status(200)
                .json_body(json!({ "subcategories": ["Backend", "Cloud"] }));
        })
        .await;
}

async fn mock_healthy(server: &MockServer, count: u64) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .json_body(json!({ "status": "ok", "document_count": count }));
        })
        .await;
}

#[tokio::test]
async fn test_search_page_flow() {
    let server = MockServer::start_async().await;
    mock_healthy(&server, 240).await;
    mock_catalogs(&server).await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/search").json_body(json!({
                "query": "python",
                "top_n": 10,
                "category": null,
                "subcategory": null,
            }));
            then.status(200).json_body(json!({
                "query": "python",
                "results": [
                    result_json(1, "Flask Basics", false),
                    result_json(2, "Django ORM", false),
                ],
            }));
        })
        .await;

    let mut shell = shell_for(&server);
    shell.mount();
    let ready = drive_until(&mut shell, Duration::from_secs(5), |shell| {
        shell.monitor().phase() == Phase::Online
            && !shell.home().filters().categories().is_empty()
            && !shell.home().filters().subcategories().is_empty()
    })
    .await;
    assert!(ready, "initial fetches did not complete");
    assert_eq!(
        shell.indicator().map(|indicator| indicator.label),
        Some("Engine Ready (240 Docs)".to_string())
    );
    assert_eq!(
        shell.home().filters().categories(),
        ["Technology".to_string(), "Products".to_string()]
    );

    shell.home_mut().set_query("python");
    assert!(shell.home_mut().submit().is_some());
    assert!(shell.home().search().is_loading());

    let done = drive_until(&mut shell, Duration::from_secs(5), |shell| {
        !shell.home().search().is_loading()
    })
    .await;
    assert!(done, "search did not complete");
    search.assert_async().await;

    let session = shell.home().search();
    assert_eq!(session.results().len(), 2);
    assert!(session.error().is_none());
    assert!(matches!(
        session.view(),
        ResultsView::Results {
            low_confidence: false,
            ..
        }
    ));
}

#[tokio::test]
async fn test_category_change_refetches_subcategories() {
    let server = MockServer::start_async().await;
    mock_healthy(&server, 10).await;
    mock_catalogs(&server).await;

    let mut shell = shell_for(&server);
    shell.home_mut().select_subcategory("Audio");
    shell.home_mut().select_category("Technology");
    assert_eq!(shell.home().filters().active_subcategory(), ALL);

    let done = drive_until(&mut shell, Duration::from_secs(5), |shell| {
        !shell.home().filters().subcategories().is_empty()
    })
    .await;
    assert!(done, "subcategories did not arrive");
    assert_eq!(
        shell.home().filters().subcategories(),
        ["Backend".to_string(), "Cloud".to_string()]
    );
    assert!(shell.home().filters().subcategory_selectable());
}

#[tokio::test]
async fn test_failed_search_shows_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/search");
            then.status(503).body("engine warming up");
        })
        .await;

    let mut shell = shell_for(&server);
    shell.home_mut().set_query("kubernetes");
    shell.home_mut().submit();

    let done = drive_until(&mut shell, Duration::from_secs(5), |shell| {
        !shell.home().search().is_loading()
    })
    .await;
    assert!(done, "search did not complete");
    assert_eq!(shell.home().search().error(), Some(SEARCH_FAILED_MESSAGE));
    assert!(shell.home().search().results().is_empty());
}

#[tokio::test]
async fn test_blank_query_changes_nothing() {
    let server = MockServer::start_async().await;
    let mut shell = shell_for(&server);
    shell.home_mut().set_query("   ");
    assert!(shell.home_mut().submit().is_none());
    assert!(!shell.home().search().is_loading());
    assert!(matches!(shell.home().search().view(), ResultsView::Idle));
}

#[tokio::test]
async fn test_connectivity_recovers_after_timeouts() {
    let server = MockServer::start_async().await;
    let slow = server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({ "status": "ok", "document_count": 3 }));
        })
        .await;

    let mut shell = shell_for(&server);
    shell.mount();

    let first = drive_until(&mut shell, Duration::from_secs(5), |shell| {
        shell.monitor().last_seq() >= Some(1)
    })
    .await;
    assert!(first);
    assert_eq!(shell.monitor().phase(), Phase::Offline);
    assert!(shell.offline_overlay().is_some());

    shell.retry_connection();
    let second = drive_until(&mut shell, Duration::from_secs(5), |shell| {
        shell.monitor().last_seq() >= Some(2)
    })
    .await;
    assert!(second);
    assert_eq!(shell.monitor().phase(), Phase::Offline);
    assert_eq!(
        shell.indicator().map(|indicator| indicator.label),
        Some("Engine Disconnected".to_string())
    );

    slow.delete_async().await;
    mock_healthy(&server, 3).await;
    shell.retry_connection();
    let online = drive_until(&mut shell, Duration::from_secs(10), |shell| {
        shell.monitor().phase() == Phase::Online
    })
    .await;
    assert!(online, "monitor never came back online");
    assert_eq!(shell.monitor().document_count(), 3);
    assert!(shell.offline_overlay().is_none());

    shell.unmount();
    assert!(!shell.monitor().is_active());
}
