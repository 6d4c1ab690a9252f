//! Alias mapping creation, resolution and removal.

use std::sync::Arc;

use crate::domain::entities::NewUrlMapping;
use crate::domain::repositories::{StorageError, UrlRepository};
use crate::error::AppError;
use crate::utils::alias_generator::{generate_alias, validate_alias};
use serde_json::json;

/// Service behind the save, redirect and delete handlers.
///
/// Owns no state besides the shared repository, so one instance serves all
/// concurrent requests.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    alias_length: usize,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    ///
    /// # Arguments
    ///
    /// - `repository` - storage for alias mappings
    /// - `alias_length` - length of generated aliases
    pub fn new(repository: Arc<R>, alias_length: usize) -> Self {
        Self {
            repository,
            alias_length,
        }
    }

    /// Stores `url` under `alias` and returns the alias actually used.
    ///
    /// A missing or empty alias is replaced by a generated one. The target URL
    /// is expected to be validated by the caller and is stored verbatim.
    ///
    /// The insert is attempted once. A taken alias, chosen or generated, is
    /// reported to the caller, who must try again with another one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid alias,
    /// [`AppError::Conflict`] if the alias exists and
    /// [`AppError::Internal`] on storage failures.
    pub async fn shorten(&self, url: String, alias: Option<String>) -> Result<String, AppError> {
        const OP: &str = "url_service.shorten";

        let alias = match alias.filter(|a| !a.is_empty()) {
            Some(alias) => alias,
            None => generate_alias(self.alias_length),
        };

        validate_alias(&alias)?;

        if !self.save(OP, &alias, &url).await? {
            return Err(AppError::conflict(
                "url already exists",
                json!({ "alias": alias }),
            ));
        }

        Ok(alias)
    }

    /// Inserts one mapping. `Ok(false)` means the alias was already taken.
    async fn save(&self, op: &'static str, alias: &str, url: &str) -> Result<bool, AppError> {
        match self
            .repository
            .save(NewUrlMapping::new(alias, url))
            .await
        {
            Ok(id) => {
                tracing::info!(op, alias, id, "url added");
                Ok(true)
            }
            Err(StorageError::AliasExists) => {
                tracing::info!(op, alias, "url already exists");
                Ok(false)
            }
            Err(e) => {
                tracing::error!(op, alias, error = %e, "failed to add url");
                Err(AppError::internal("failed to add url", json!({ "alias": alias })))
            }
        }
    }

    /// Returns the target URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty alias,
    /// [`AppError::NotFound`] if the alias is unknown and
    /// [`AppError::Internal`] on storage failures.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        const OP: &str = "url_service.resolve";

        reject_empty(OP, alias)?;

        match self.repository.get(alias).await {
            Ok(url) => {
                tracing::info!(op = OP, alias, url, "got url");
                Ok(url)
            }
            Err(StorageError::NotFound) => {
                tracing::info!(op = OP, alias, "url not found");
                Err(AppError::not_found("not found", json!({ "alias": alias })))
            }
            Err(e) => {
                tracing::error!(op = OP, alias, error = %e, "failed to get url");
                Err(AppError::internal("internal error", json!({ "alias": alias })))
            }
        }
    }

    /// Removes the mapping stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty alias,
    /// [`AppError::NotFound`] if the alias is unknown and
    /// [`AppError::Internal`] on storage failures.
    pub async fn remove(&self, alias: &str) -> Result<(), AppError> {
        const OP: &str = "url_service.remove";

        reject_empty(OP, alias)?;

        match self.repository.delete(alias).await {
            Ok(()) => {
                tracing::info!(op = OP, alias, "url deleted");
                Ok(())
            }
            Err(StorageError::NotFound) => {
                tracing::info!(op = OP, alias, "url not found");
                Err(AppError::not_found("url not found", json!({ "alias": alias })))
            }
            Err(e) => {
                tracing::error!(op = OP, alias, error = %e, "failed to delete url");
                Err(AppError::internal(
                    "failed to delete url",
                    json!({ "alias": alias }),
                ))
            }
        }
    }

    /// Returns `true` when storage answers a trivial query.
    pub async fn is_healthy(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(op = "url_service.is_healthy", error = %e, "storage ping failed");
                false
            }
        }
    }
}

fn reject_empty(op: &'static str, alias: &str) -> Result<(), AppError> {
    if alias.is_empty() {
        tracing::info!(op, "empty alias");
        return Err(AppError::bad_request("invalid request", json!({})));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;

    fn service(repo: MockUrlRepository) -> UrlService<MockUrlRepository> {
        UrlService::new(Arc::new(repo), 6)
    }

    fn db_error() -> StorageError {
        StorageError::Database(sqlx::Error::PoolClosed)
    }

    #[tokio::test]
    async fn test_shorten_with_client_alias() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_save()
            .withf(|m| m.alias == "ex1" && m.url == "https://example.com/page")
            .times(1)
            .returning(|_| Ok(1));

        let result = service(mock_repo)
            .shorten("https://example.com/page".to_string(), Some("ex1".to_string()))
            .await;

        assert_eq!(result.unwrap(), "ex1");
    }

    #[tokio::test]
    async fn test_shorten_generates_alias_when_absent() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_save()
            .withf(|m| m.alias.len() == 6)
            .times(1)
            .returning(|_| Ok(1));

        let alias = service(mock_repo)
            .shorten("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(alias.len(), 6);
    }

    #[tokio::test]
    async fn test_shorten_treats_empty_alias_as_absent() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_save()
            .withf(|m| !m.alias.is_empty())
            .times(1)
            .returning(|_| Ok(1));

        let alias = service(mock_repo)
            .shorten("https://example.com".to_string(), Some(String::new()))
            .await
            .unwrap();

        assert!(!alias.is_empty());
    }

    #[tokio::test]
    async fn test_shorten_client_alias_conflict_is_not_retried() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_save()
            .times(1)
            .returning(|_| Err(StorageError::AliasExists));

        let err = service(mock_repo)
            .shorten("https://example.com".to_string(), Some("taken".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "url already exists");
    }

    #[tokio::test]
    async fn test_shorten_generated_alias_conflict_is_reported() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_save()
            .times(1)
            .returning(|_| Err(StorageError::AliasExists));

        let err = service(mock_repo)
            .shorten("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "url already exists");
    }

    #[tokio::test]
    async fn test_shorten_zero_alias_length_never_touches_storage() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_save().times(0);

        let err = UrlService::new(Arc::new(mock_repo), 0)
            .shorten("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shorten_invalid_alias_never_touches_storage() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_save().times(0);

        let err = service(mock_repo)
            .shorten("https://example.com".to_string(), Some("a/b".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shorten_storage_failure_is_opaque() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_save().times(1).returning(|_| Err(db_error()));

        let err = service(mock_repo)
            .shorten("https://example.com".to_string(), Some("ex1".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "failed to add url");
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_get()
            .withf(|alias| alias == "ex1")
            .times(1)
            .returning(|_| Ok("https://example.com/page".to_string()));

        let url = service(mock_repo).resolve("ex1").await.unwrap();

        assert_eq!(url, "https://example.com/page");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_get()
            .times(1)
            .returning(|_| Err(StorageError::NotFound));

        let err = service(mock_repo).resolve("nope").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_storage_failure_is_not_not_found() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_get().times(1).returning(|_| Err(db_error()));

        let err = service(mock_repo).resolve("ex1").await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "internal error");
    }

    #[tokio::test]
    async fn test_resolve_empty_alias() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_get().times(0);

        let err = service(mock_repo).resolve("").await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_remove_existing() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_delete()
            .withf(|alias| alias == "ex1")
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(mock_repo).remove("ex1").await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_not_found() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_| Err(StorageError::NotFound));

        let err = service(mock_repo).remove("ex1").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_remove_empty_alias() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_delete().times(0);

        let err = service(mock_repo).remove("").await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_is_healthy_reflects_ping() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_ping().times(1).returning(|| Err(db_error()));

        assert!(!service(mock_repo).is_healthy().await);
    }
}
