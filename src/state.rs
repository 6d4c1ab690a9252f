//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::api::middleware::auth::BasicCredentials;
use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

/// State cloned into each request.
///
/// The storage handle lives inside [`UrlService`]; there is no process-wide
/// singleton, so tests build their own state around any repository.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
    pub credentials: Arc<BasicCredentials>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        alias_length: usize,
        credentials: BasicCredentials,
    ) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository, alias_length)),
            credentials: Arc::new(credentials),
        }
    }
}
