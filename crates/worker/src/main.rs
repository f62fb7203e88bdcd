//! Maintenance CLI: one-shot commands against the Linkvault database.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linkvault_core::password::hash_password;
use linkvault_core::validate::validate_email;
use linkvault_db::models::user::CreateUser;
use linkvault_db::repositories::{SessionRepo, UserRepo};
use linkvault_db::DbPool;
use linkvault_scrape::config::ScrapeConfig;
use linkvault_scrape::pipeline::ScrapePipeline;

mod import;

#[derive(Parser)]
#[command(name = "linkvault-worker", version, about = "Linkvault maintenance commands")]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one bookmark refresh batch
    ScrapeBatch,
    /// Register a user account
    CreateUser {
        /// Email address the account logs in with
        #[arg(long)]
        email: String,
        /// Plaintext password, hashed before storage
        #[arg(long)]
        password: String,
    },
    /// Delete sessions older than the retention window
    PruneSessions {
        /// Retention window in days
        #[arg(long, env = "REMOVE_SESSIONS_OLDER_THAN_DAYS", default_value = "30")]
        days: i64,
    },
    /// Import a browser bookmark export (JSON)
    Import {
        /// Path to the export file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkvault_worker=info,linkvault_scrape=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let pool = linkvault_db::create_pool(&cli.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::ScrapeBatch => cmd_scrape_batch(&pool).await?,
        Commands::CreateUser { email, password } => {
            cmd_create_user(&pool, &email, &password).await?
        }
        Commands::PruneSessions { days } => cmd_prune_sessions(&pool, days).await?,
        Commands::Import { path } => cmd_import(&pool, &path).await?,
    }

    Ok(())
}

/// Run a single fetch/extract batch over stale and pending bookmarks.
async fn cmd_scrape_batch(pool: &DbPool) -> Result<()> {
    let config = ScrapeConfig::from_env();
    let pipeline = ScrapePipeline::new(config);

    let outcome = pipeline.run_batch(pool).await.context("Batch run failed")?;

    println!(
        "Scraped {} bookmarks, {} failures",
        outcome.scraped, outcome.failed
    );
    Ok(())
}

/// Register a new account, hashing the password before storage.
async fn cmd_create_user(pool: &DbPool, email: &str, password: &str) -> Result<()> {
    validate_email(email)?;

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?;
    let input = CreateUser {
        email: email.to_string(),
        password_hash,
    };

    let user = match UserRepo::create(pool, &input).await {
        Ok(user) => user,
        Err(err) if linkvault_db::unique_constraint(&err) == Some("uq_users_email") => {
            anyhow::bail!("A user with email '{email}' already exists");
        }
        Err(err) => return Err(err).context("User creation failed"),
    };

    println!("User created: {} (id {})", user.email, user.id);
    Ok(())
}

/// Delete sessions created before the retention cutoff.
async fn cmd_prune_sessions(pool: &DbPool, days: i64) -> Result<()> {
    let cutoff = Utc::now() - chrono::Duration::days(days);
    let deleted = SessionRepo::delete_created_before(pool, cutoff)
        .await
        .context("Session pruning failed")?;

    println!("Removed {deleted} sessions older than {days} days");
    Ok(())
}

/// Import bookmarks from a browser export file.
async fn cmd_import(pool: &DbPool, path: &Path) -> Result<()> {
    let config = ScrapeConfig::from_env();
    let report = import::import_browser_export(pool, &config, path).await?;

    println!(
        "Imported {} bookmarks ({} entries skipped)",
        report.imported, report.skipped
    );
    Ok(())
}
