mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use url_alias::api::handlers::redirect_handler;

async fn create_server() -> (TestServer, std::sync::Arc<url_alias::prelude::SqliteUrlRepository>) {
    let repo = common::create_test_repository().await;
    let app = Router::new()
        .route("/{alias}", get(redirect_handler))
        .with_state(common::create_test_state(repo.clone()));

    (TestServer::new(app).unwrap(), repo)
}

#[tokio::test]
async fn test_redirect_success() {
    let (server, repo) = create_server().await;
    common::create_test_mapping(&repo, "target", "https://example.com/target").await;

    let response = server.get("/target").await;

    assert_eq!(response.status_code(), 302);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_keeps_url_verbatim() {
    let (server, repo) = create_server().await;
    let url = "https://EXAMPLE.com:443/Path?q=1&b=%20#frag";
    common::create_test_mapping(&repo, "verbatim", url).await;

    let response = server.get("/verbatim").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), url);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _repo) = create_server().await;

    let response = server.get("/notfound").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "Error", "error": "not found" }));
    assert!(response.headers().get("location").is_none());
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let (server, repo) = create_server().await;
    common::create_test_mapping(&repo, "CaSe", "https://example.com").await;

    let response = server.get("/case").await;

    response.assert_json(&json!({ "status": "Error", "error": "not found" }));
}
