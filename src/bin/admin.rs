//! CLI administration tool for url-alias.
//!
//! Works directly against the SQLite store, applying the same alias rules as
//! the HTTP API, for operators without API credentials at hand.
//!
//! # Usage
//!
//! ```bash
//! # Store a URL under a chosen or generated alias
//! cargo run --bin admin -- url add https://example.com/page --alias ex1
//!
//! # Show where an alias points
//! cargo run --bin admin -- url show ex1
//!
//! # Delete an alias
//! cargo run --bin admin -- url delete ex1
//!
//! # Check the store
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `STORAGE_PATH` (optional): SQLite database, default `storage/sqlite/urls.db`
//! - `ALIAS_LENGTH` (optional): length of generated aliases, default 6, range 4-32

use url_alias::AppError;
use url_alias::api::dto::save::SaveRequest;
use url_alias::application::services::UrlService;
use url_alias::config;
use url_alias::infrastructure::persistence::SqliteUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use validator::Validate;
use std::sync::Arc;

/// CLI tool for managing url-alias.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Storage path (overrides STORAGE_PATH)
    #[arg(long, global = true)]
    storage: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage alias mappings
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Alias mapping subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Store a URL under an alias
    Add {
        /// Destination URL (absolute)
        url: String,

        /// Alias to use (generated if omitted)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the mapping for an alias
    Show {
        alias: String,
    },

    /// Delete an alias
    Delete {
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show mapping count
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let storage_path = cli
        .storage
        .or_else(|| std::env::var("STORAGE_PATH").ok())
        .unwrap_or_else(|| "storage/sqlite/urls.db".to_string());

    let repo = SqliteUrlRepository::connect(&storage_path, 1)
        .await
        .with_context(|| format!("Failed to open storage at {storage_path}"))?;

    let result = match cli.command {
        Commands::Url { action } => handle_url_action(action, &repo).await,
        Commands::Db { action } => handle_db_action(action, &repo, &storage_path).await,
    };

    repo.close().await;

    result
}

/// Dispatches alias management commands.
async fn handle_url_action(action: UrlAction, repo: &SqliteUrlRepository) -> Result<()> {
    let alias_length = config::alias_length_from_env()?;

    let service = UrlService::new(Arc::new(repo.clone()), alias_length);

    match action {
        UrlAction::Add { url, alias } => add_url(&service, url, alias).await,
        UrlAction::Show { alias } => show_url(repo, &alias).await,
        UrlAction::Delete { alias, yes } => delete_url(&service, repo, &alias, yes).await,
    }
}

/// Stores a URL after the same validation the API applies.
async fn add_url(
    service: &UrlService<SqliteUrlRepository>,
    url: String,
    alias: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Add URL".bright_blue().bold());
    println!();

    let request = SaveRequest::new(url.clone(), alias);
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("'{}': {}", url, AppError::from(e)))?;

    let alias = service
        .shorten(url.clone(), request.alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to add url: {}", e))?;

    println!("  Alias: {}", alias.bright_yellow().bold());
    println!("  URL:   {}", url.cyan());
    println!();
    println!("{}", "✅ URL added successfully!".green().bold());
    println!();

    Ok(())
}

/// Prints the stored row for an alias.
async fn show_url(repo: &SqliteUrlRepository, alias: &str) -> Result<()> {
    let mapping = repo
        .find(alias)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Alias not found")?;

    println!("  {:<6} {}", "ID".bright_white().bold(), mapping.id.to_string().bright_black());
    println!("  {:<6} {}", "Alias".bright_white().bold(), mapping.alias.cyan());
    println!("  {:<6} {}", "URL".bright_white().bold(), mapping.url);

    Ok(())
}

/// Deletes an alias with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation unless `--yes` (default: No)
async fn delete_url(
    service: &UrlService<SqliteUrlRepository>,
    repo: &SqliteUrlRepository,
    alias: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑  Delete URL".bright_blue().bold());
    println!();

    let mapping = repo
        .find(alias)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Alias not found")?;

    println!("  Alias: {}", mapping.alias.cyan());
    println!("  URL:   {}", mapping.url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this alias?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .remove(alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete url: {}", e))?;

    println!("{}", "✅ Alias deleted".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    repo: &SqliteUrlRepository,
    storage_path: &str,
) -> Result<()> {
    use url_alias::domain::repositories::UrlRepository;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking storage...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Storage check failed: {}", e))?;

            let count = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            println!("  Path:     {}", storage_path.bright_white());
            println!("  Mappings: {}", count.to_string().bright_green().bold());
            println!("{}", "✅ Storage OK".green().bold());
        }
    }

    Ok(())
}
