//! SQLite implementation of the URL repository.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{StorageError, UrlRepository};

/// How long a writer waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Query parameters understood by the SQLite driver.
const DRIVER_PARAMS: &[&str] = &["mode", "cache", "immutable", "vfs"];

/// SQLite repository for alias mappings.
///
/// Alias uniqueness is enforced by the `UNIQUE` constraint on `url.alias`;
/// no application-level locking is involved. The pool is shared by all
/// concurrent requests and SQLite serializes conflicting writes.
#[derive(Clone)]
pub struct SqliteUrlRepository {
    pool: Pool<Sqlite>,
}

impl SqliteUrlRepository {
    /// Opens (or creates) the store at `storage_path` and ensures the schema.
    ///
    /// `storage_path` may be a plain file path, a `sqlite:` URL, a `file:` URI
    /// or an in-memory target such as `:memory:`. For file-backed stores the
    /// parent directory is created first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created and
    /// [`StorageError::Database`] if the database cannot be opened or the
    /// schema cannot be created.
    pub async fn connect(storage_path: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = connect_options(storage_path)?;

        if is_in_memory(storage_path) {
            return Self::open_memory(options).await;
        }

        let fs_path = filesystem_path(storage_path);
        if let Some(parent) = fs_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        let repository = Self { pool };
        repository.init_schema().await?;

        tracing::debug!(path = %fs_path.display(), "storage opened");

        Ok(repository)
    }

    /// Opens a private in-memory store.
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::open_memory(SqliteConnectOptions::from_str("sqlite::memory:")?).await
    }

    /// In-memory databases live as long as their connection, so the pool keeps
    /// exactly one connection open forever.
    async fn open_memory(options: SqliteConnectOptions) -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let repository = Self { pool };
        repository.init_schema().await?;

        Ok(repository)
    }

    /// Idempotent schema creation: the `url` table and its alias index.
    async fn init_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS url(
                id INTEGER PRIMARY KEY,
                alias TEXT NOT NULL UNIQUE,
                url TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_alias ON url(alias)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Loads the full row for an alias.
    pub async fn find(&self, alias: &str) -> Result<Option<UrlMapping>, StorageError> {
        let mapping =
            sqlx::query_as::<_, UrlMapping>("SELECT id, alias, url FROM url WHERE alias = ?")
                .bind(alias)
                .fetch_optional(&self.pool)
                .await?;

        Ok(mapping)
    }

    /// Counts stored mappings.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn save(&self, new_mapping: NewUrlMapping) -> Result<i64, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO url(url, alias)
            VALUES(?, ?)
            ON CONFLICT(alias) DO NOTHING
            "#,
        )
        .bind(&new_mapping.url)
        .bind(&new_mapping.alias)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::AliasExists);
        }

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, alias: &str) -> Result<String, StorageError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn delete(&self, alias: &str) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM url WHERE alias = ?")
            .bind(alias)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn is_in_memory(storage_path: &str) -> bool {
    matches!(storage_path, ":memory:" | "sqlite::memory:") || storage_path.contains("mode=memory")
}

/// Driver options for a storage path. `file:` URIs are accepted as an alias
/// for the `sqlite:` scheme. Query parameters the driver does not know, such
/// as `_busy_timeout`, are dropped.
fn connect_options(storage_path: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    let dsn = storage_path.strip_prefix("file:").unwrap_or(storage_path);

    let Some((path, query)) = dsn.split_once('?') else {
        return SqliteConnectOptions::from_str(dsn);
    };

    let kept: Vec<&str> = query
        .split('&')
        .filter(|param| {
            let key = param.split_once('=').map_or(*param, |(key, _)| key);
            let known = DRIVER_PARAMS.contains(&key);
            if !known && !key.is_empty() {
                tracing::debug!(param = key, "ignoring storage parameter");
            }
            known
        })
        .collect();

    if kept.is_empty() {
        SqliteConnectOptions::from_str(path)
    } else {
        SqliteConnectOptions::from_str(&format!("{path}?{}", kept.join("&")))
    }
}

/// Filesystem location of a storage path: scheme and query string removed.
fn filesystem_path(storage_path: &str) -> PathBuf {
    let path = storage_path
        .strip_prefix("sqlite:")
        .or_else(|| storage_path.strip_prefix("file:"))
        .unwrap_or(storage_path);

    let path = path.strip_prefix("//").unwrap_or(path);
    let path = path.split_once('?').map_or(path, |(p, _)| p);

    PathBuf::from(path)
}
