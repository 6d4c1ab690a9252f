mod common;

use axum::{Router, routing::delete};
use axum_test::TestServer;
use serde_json::json;
use url_alias::api::handlers::delete_handler;
use url_alias::domain::repositories::{StorageError, UrlRepository};

async fn create_server() -> (TestServer, std::sync::Arc<url_alias::prelude::SqliteUrlRepository>) {
    let repo = common::create_test_repository().await;
    let app = Router::new()
        .route("/url/{alias}", delete(delete_handler))
        .with_state(common::create_test_state(repo.clone()));

    (TestServer::new(app).unwrap(), repo)
}

#[tokio::test]
async fn test_delete_existing() {
    let (server, repo) = create_server().await;
    common::create_test_mapping(&repo, "ex1", "https://example.com").await;

    let response = server.delete("/url/ex1").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "OK" }));
    assert!(matches!(repo.get("ex1").await, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn test_delete_unknown() {
    let (server, repo) = create_server().await;
    common::create_test_mapping(&repo, "keep", "https://example.com").await;

    let response = server.delete("/url/missing").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "Error", "error": "url not found" }));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_twice() {
    let (server, repo) = create_server().await;
    common::create_test_mapping(&repo, "once", "https://example.com").await;

    server.delete("/url/once").await.assert_json(&json!({ "status": "OK" }));

    let response = server.delete("/url/once").await;
    response.assert_json(&json!({ "status": "Error", "error": "url not found" }));
}
