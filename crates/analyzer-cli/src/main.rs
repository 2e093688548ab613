use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use analyzer_client::{FetcherConfig, ReqwestFetcher, ScraperInspector};
use analyzer_core::models::Site;
use analyzer_core::{AppError, CheckService, normalize_url, register_url, site_details};
use analyzer_db::{Database, DatabaseConfig};

#[derive(Parser)]
#[command(name = "analyzer", version, about = "Website SEO checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a website (no-op if already registered)
    Add {
        /// Website address, e.g. https://example.com/some/page
        url: String,
    },

    /// List registered sites with their latest check
    List,

    /// Show a site and its check history
    Show {
        /// Site id or address
        site: String,
    },

    /// Fetch a site's front page and record a check
    Check {
        /// Site id or address
        site: String,

        /// Request timeout in seconds
        #[arg(short, long, env = "ANALYZER_FETCH_TIMEOUT_SECS")]
        timeout: Option<u64>,
    },

    /// Print the canonical form of an address without touching the database
    Normalize {
        url: String,
    },

    /// Apply pending database migrations
    Migrate,
}

/// How the user referred to a site on the command line.
#[derive(Debug, PartialEq, Eq)]
enum SiteRef {
    Id(Uuid),
    Name(String),
}

impl SiteRef {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match Uuid::parse_str(raw.trim()) {
            Ok(id) => Ok(SiteRef::Id(id)),
            Err(_) => Ok(SiteRef::Name(normalize_url(raw)?)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("analyzer=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize { url } => {
            let name = normalize_url(&url).map_err(AppError::from)?;
            println!("{name}");
        }
        Commands::Migrate => {
            connect_db().await?;
            println!("Migrations applied");
        }
        Commands::Add { url } => {
            let db = connect_db().await?;
            cmd_add(&db, &url).await?;
        }
        Commands::List => {
            let db = connect_db().await?;
            cmd_list(&db).await?;
        }
        Commands::Show { site } => {
            let db = connect_db().await?;
            cmd_show(&db, &site).await?;
        }
        Commands::Check { site, timeout } => {
            let db = connect_db().await?;
            let mut config = FetcherConfig::from_env()?;
            if let Some(secs) = timeout {
                config.timeout = std::time::Duration::from_secs(secs.max(1));
            }
            if !cmd_check(&db, &site, &config).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Connect to PostgreSQL using DATABASE_URL and apply migrations.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env()?;
    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await?;
    Ok(db)
}

async fn resolve_site(db: &Database, raw: &str) -> Result<Site> {
    let site = match SiteRef::parse(raw)? {
        SiteRef::Id(id) => db.site_repo().get_site(id).await?,
        SiteRef::Name(name) => db.site_repo().find_by_name(&name).await?,
    };
    site.ok_or_else(|| AppError::NotFound(format!("site '{raw}'")).into())
}

async fn cmd_add(db: &Database, url: &str) -> Result<()> {
    let registration = register_url(&db.site_repo(), url).await?;
    println!("{}", serde_json::to_string_pretty(&registration)?);
    Ok(())
}

async fn cmd_list(db: &Database) -> Result<()> {
    let sites = db.site_repo().list_sites().await?;

    if sites.is_empty() {
        println!("No sites registered");
        return Ok(());
    }

    println!("{:<36}  {:<40}  {:<10}  STATUS", "ID", "NAME", "CHECKED");
    for site in &sites {
        let checked = site
            .last_checked_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let status = site
            .last_status_code
            .map(|code| code.to_string())
            .unwrap_or_default();
        println!("{:<36}  {:<40}  {:<10}  {}", site.id, site.name, checked, status);
    }

    println!("\nTotal: {} sites", sites.len());
    Ok(())
}

async fn cmd_show(db: &Database, raw: &str) -> Result<()> {
    let site = resolve_site(db, raw).await?;
    let (site, checks) = site_details(&db.site_repo(), &db.check_repo(), site.id).await?;

    println!("{} ({})", site.name, site.id);
    println!("Registered: {}\n", site.created_at.format("%Y-%m-%d %H:%M:%S UTC"));

    if checks.is_empty() {
        println!("No checks yet");
        return Ok(());
    }

    for check in &checks {
        let status = check
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "FAILED".to_string());
        println!(
            "  [{}] {}  h1={:?} title={:?} description={:?}",
            status,
            check.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            check.h1,
            check.title,
            check.description,
        );
    }

    println!("\nTotal: {} checks", checks.len());
    Ok(())
}

/// Returns whether the page was fetched.
async fn cmd_check(db: &Database, raw: &str, config: &FetcherConfig) -> Result<bool> {
    let site = resolve_site(db, raw).await?;

    let service = CheckService::new(
        ReqwestFetcher::with_config(config)?,
        ScraperInspector::new()?,
        db.site_repo(),
        db.check_repo(),
    );
    let report = service.check_site(site.id).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(reason) = &report.fetch_error {
        tracing::error!(name = %site.name, %reason, "Check failed; attempt recorded");
    }
    Ok(report.is_success())
}
