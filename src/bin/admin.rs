//! CLI administration tool for url-shortener.
//!
//! Exposes the administrative store operations that are deliberately not
//! part of the HTTP API: listing every mapping and deleting one.
//!
//! # Usage
//!
//! ```bash
//! # List all short links
//! cargo run --bin admin -- list
//!
//! # Delete a short link
//! cargo run --bin admin -- delete aB3xY9
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (optional): SQLite connection string

use url_shortener::application::services::LinkService;
use url_shortener::config::{Config, load_from_env};
use url_shortener::infrastructure::persistence::SqliteMappingRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// List every short link
    List,

    /// Delete a short link
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

type Service = LinkService<SqliteMappingRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_from_env()?;

    let repository = Arc::new(open_repository(&config).await?);
    let service = LinkService::new(repository.clone());

    let outcome = match cli.command {
        Commands::List => list_links(&service).await,
        Commands::Delete { code, yes } => delete_link(&service, code, yes).await,
        Commands::Stats => show_stats(&service).await,
        Commands::Db {
            action: DbAction::Check,
        } => check_db(&repository, &config).await,
    };

    repository.close().await;
    outcome
}

async fn open_repository(config: &Config) -> Result<SqliteMappingRepository> {
    SqliteMappingRepository::connect(
        &config.database_url,
        config.db_max_connections,
        config.busy_timeout(),
    )
    .await
    .with_context(|| format!("Failed to open database '{}'", config.database_url))
}

/// Lists all mappings, newest first.
///
/// # Output Format
///
/// ```text
/// 🔗 Short Links
///
///   Code    Clicks  Created            URL
///   ──────────────────────────────────────────────────────────────
///   aB3xY9  12      2024-01-15 10:30   https://example.com/page
/// ```
async fn list_links(service: &Service) -> Result<()> {
    println!("{}", "🔗 Short Links".bright_blue().bold());
    println!();

    let mappings = service
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<7} {:<7} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<7} {:<7} {:<18} {}",
            mapping.short_code.cyan(),
            mapping.click_count.to_string().bright_white(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.original_url
        );
    }

    println!();
    println!("  Total: {}", mappings.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a mapping after confirmation.
async fn delete_link(service: &Service, code: String, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete short link '{}'?", code))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = service
        .delete(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if removed {
        println!("{} {}", "✅ Deleted".green().bold(), code.cyan());
    } else {
        println!("{} {}", "⚠️  No short link with code".yellow(), code.cyan());
    }

    Ok(())
}

/// Shows the number of links and the total number of recorded visits.
async fn show_stats(service: &Service) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let mappings = service
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;

    let total_clicks: i64 = mappings.iter().map(|m| m.click_count).sum();

    println!("  Links:  {}", mappings.len().to_string().bright_white().bold());
    println!("  Clicks: {}", total_clicks.to_string().bright_white().bold());

    if let Some(top) = mappings.iter().max_by_key(|m| m.click_count)
        && top.click_count > 0
    {
        println!(
            "  Top:    {} ({} clicks) → {}",
            top.short_code.cyan(),
            top.click_count,
            top.original_url
        );
    }
    println!();

    Ok(())
}

/// Verifies that the database answers queries.
async fn check_db(repository: &SqliteMappingRepository, config: &Config) -> Result<()> {
    print!("Checking {}... ", config.database_url);

    match repository.ping().await {
        Ok(()) => {
            println!("{}", "✅ OK".green().bold());
            Ok(())
        }
        Err(e) => {
            println!("{}", "❌ FAILED".red().bold());
            Err(anyhow::anyhow!("Database check failed: {}", e))
        }
    }
}
