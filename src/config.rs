//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! A `.env` file in the working directory is honored (see `main.rs`).
//!
//! ## Required Variables
//!
//! - `HTTP_USER` / `HTTP_PASSWORD` - Basic auth credentials for `/url` routes
//!
//! ## Optional Variables
//!
//! - `APP_ENV` - `local`, `dev` or `prod` (default: `local`)
//! - `LISTEN` - Bind address (default: `127.0.0.1:8080`)
//! - `STORAGE_PATH` - SQLite file, `sqlite:` URL or `:memory:`
//!   (default: `storage/sqlite/urls.db`)
//! - `HTTP_TIMEOUT` - Request timeout in seconds (default: 4)
//! - `ALIAS_LENGTH` - Length of generated aliases (default: 6, range: 4-32)
//! - `DB_MAX_CONNECTIONS` - SQLite pool size (default: 10)
//! - `RUST_LOG` - Log filter (default: `debug` for local/dev, `info` for prod)
//! - `LOG_FORMAT` - `text` or `json` (default: `text` for local, `json` otherwise)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::utils::alias_generator::{DEFAULT_ALIAS_LENGTH, GENERATED_ALIAS_LENGTHS};

/// Deployment environment; selects logging defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Local,
    Dev,
    Prod,
}

impl AppEnv {
    /// Parses `APP_ENV`. Unknown values fall back to [`AppEnv::Prod`] so a
    /// typo never enables debug logging in production.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "local" => AppEnv::Local,
            "dev" => AppEnv::Dev,
            _ => AppEnv::Prod,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnv::Local => "local",
            AppEnv::Dev => "dev",
            AppEnv::Prod => "prod",
        }
    }

    fn default_log_level(&self) -> &'static str {
        match self {
            AppEnv::Local | AppEnv::Dev => "debug",
            AppEnv::Prod => "info",
        }
    }

    fn default_log_format(&self) -> &'static str {
        match self {
            AppEnv::Local => "text",
            AppEnv::Dev | AppEnv::Prod => "json",
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: AppEnv,
    pub listen_addr: String,
    pub storage_path: String,
    pub http_user: String,
    pub http_password: String,
    /// Upper bound for handling a single request.
    pub request_timeout: Duration,
    pub alias_length: usize,
    pub db_max_connections: u32,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the basic auth credentials are missing.
    pub fn from_env() -> Result<Self> {
        let env = AppEnv::parse(&env::var("APP_ENV").unwrap_or_else(|_| "local".to_string()));

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let storage_path =
            env::var("STORAGE_PATH").unwrap_or_else(|_| "storage/sqlite/urls.db".to_string());

        let http_user = env::var("HTTP_USER").context("HTTP_USER must be set")?;
        let http_password = env::var("HTTP_PASSWORD").context("HTTP_PASSWORD must be set")?;

        let request_timeout = Duration::from_secs(parse_or("HTTP_TIMEOUT", 4));
        let alias_length = parse_or("ALIAS_LENGTH", DEFAULT_ALIAS_LENGTH);
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", 10);

        let log_level =
            env::var("RUST_LOG").unwrap_or_else(|_| env.default_log_level().to_string());
        let log_format =
            env::var("LOG_FORMAT").unwrap_or_else(|_| env.default_log_format().to_string());

        Ok(Self {
            env,
            listen_addr,
            storage_path,
            http_user,
            http_password,
            request_timeout,
            alias_length,
            db_max_connections,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `storage_path` is empty
    /// - credentials are empty
    /// - `request_timeout` is zero
    /// - `alias_length` is outside 4-32
    /// - `db_max_connections` is zero
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.storage_path.trim().is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }

        if self.http_user.is_empty() || self.http_password.is_empty() {
            anyhow::bail!("HTTP_USER and HTTP_PASSWORD must not be empty");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("HTTP_TIMEOUT must be greater than 0");
        }

        check_alias_length(self.alias_length)?;

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env.as_str());
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Storage: {}", self.storage_path);
        tracing::info!("  Basic auth user: {} (password: ***)", self.http_user);
        tracing::info!("  Request timeout: {}s", self.request_timeout.as_secs());
        tracing::info!("  Alias length: {}", self.alias_length);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads and parses a variable, falling back to `default` when it is unset
/// or unparsable.
fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn check_alias_length(alias_length: usize) -> Result<()> {
    if !GENERATED_ALIAS_LENGTHS.contains(&alias_length) {
        anyhow::bail!(
            "ALIAS_LENGTH must be between {} and {}, got {}",
            GENERATED_ALIAS_LENGTHS.start(),
            GENERATED_ALIAS_LENGTHS.end(),
            alias_length
        );
    }
    Ok(())
}

/// Reads `ALIAS_LENGTH` alone, for tools that do not need the full
/// server configuration.
///
/// # Errors
///
/// Returns an error if the value is outside the accepted range.
pub fn alias_length_from_env() -> Result<usize> {
    let alias_length = parse_or("ALIAS_LENGTH", DEFAULT_ALIAS_LENGTH);
    check_alias_length(alias_length)?;
    Ok(alias_length)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
