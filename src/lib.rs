//! # URL Alias
//!
//! A small URL shortening service built with Axum and SQLite: it stores a
//! long URL under a short alias and redirects visitors who request the alias.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The URL mapping entity and storage contract
//! - **Application Layer** ([`application`]) - Save, resolve and delete rules
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite storage engine
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## HTTP Surface
//!
//! | Method | Path            | Auth  |
//! |--------|-----------------|-------|
//! | POST   | `/url`          | basic |
//! | DELETE | `/url/{alias}`  | basic |
//! | GET    | `/{alias}`      | none  |
//! | GET    | `/health`       | none  |
//!
//! ## Quick Start
//!
//! ```bash
//! export HTTP_USER="myuser"
//! export HTTP_PASSWORD="mypass"
//! export STORAGE_PATH="storage/sqlite/urls.db"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::middleware::auth::BasicCredentials;
    pub use crate::application::services::UrlService;
    pub use crate::domain::entities::{NewUrlMapping, UrlMapping};
    pub use crate::domain::repositories::{StorageError, UrlRepository};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::SqliteUrlRepository;
    pub use crate::state::AppState;
}
