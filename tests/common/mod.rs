#![allow(dead_code)]

use axum_test::TestServer;
use base64::Engine as _;
use std::sync::Arc;
use std::time::Duration;
use url_alias::api::middleware::auth::BasicCredentials;
use url_alias::domain::entities::NewUrlMapping;
use url_alias::domain::repositories::UrlRepository;
use url_alias::infrastructure::persistence::SqliteUrlRepository;
use url_alias::routes::app_router;
use url_alias::state::AppState;

pub const USER: &str = "myuser";
pub const PASSWORD: &str = "mypass";
pub const ALIAS_LENGTH: usize = 6;

pub async fn create_test_repository() -> Arc<SqliteUrlRepository> {
    Arc::new(SqliteUrlRepository::in_memory().await.unwrap())
}

pub async fn create_test_mapping(repo: &SqliteUrlRepository, alias: &str, url: &str) -> i64 {
    repo.save(NewUrlMapping::new(alias, url)).await.unwrap()
}

pub fn create_test_state(repo: Arc<SqliteUrlRepository>) -> AppState {
    AppState::new(repo, ALIAS_LENGTH, BasicCredentials::new(USER, PASSWORD))
}

/// Full application router, middleware included.
pub async fn create_test_server() -> (TestServer, Arc<SqliteUrlRepository>) {
    let repo = create_test_repository().await;
    let app = app_router(create_test_state(repo.clone()), Duration::from_secs(4));

    let server = TestServer::new(app).unwrap();

    (server, repo)
}

pub fn basic_auth(user: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
    format!("Basic {encoded}")
}

pub fn valid_auth() -> String {
    basic_auth(USER, PASSWORD)
}
