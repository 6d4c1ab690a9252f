//! Repository trait for alias mapping storage.

use async_trait::async_trait;

use crate::domain::entities::NewUrlMapping;

/// Storage-level failures.
///
/// [`StorageError::AliasExists`] and [`StorageError::NotFound`] are domain
/// conditions the caller is expected to handle. The remaining variants are
/// infrastructure failures and must not be reported as either of them.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("url alias already exists")]
    AliasExists,

    #[error("url not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// True for failures that are not domain conditions.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, StorageError::Database(_) | StorageError::Io(_))
    }
}

/// Repository interface for alias mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new mapping and returns its id.
    ///
    /// The insert is atomic: when the alias is taken nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AliasExists`] if the alias is already mapped.
    async fn save(&self, new_mapping: NewUrlMapping) -> Result<i64, StorageError>;

    /// Returns the target URL for an exact, case-sensitive alias match.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no mapping has this alias.
    async fn get(&self, alias: &str) -> Result<String, StorageError>;

    /// Removes the mapping for an alias.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing was removed.
    async fn delete(&self, alias: &str) -> Result<(), StorageError>;

    /// Checks that storage answers queries.
    async fn ping(&self) -> Result<(), StorageError>;
}
