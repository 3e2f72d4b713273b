//! CLI administration tool for domain-overlay.
//!
//! Provides commands for inspecting and registering sites, checking the alias
//! table against the registry, and dry-running host resolution without
//! sending HTTP traffic.
//!
//! # Usage
//!
//! ```bash
//! # List live sites
//! cargo run --bin admin -- site list
//!
//! # Register a site on the primary network
//! cargo run --bin admin -- site add --domain blog.example --path /
//!
//! # Verify every configured alias points at a live site
//! cargo run --bin admin -- alias check
//!
//! # Show what the overlay would do for a host and path
//! cargo run --bin admin -- resolve extrachill.link --path /join
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (see `domain_overlay::config`).
//! `DATABASE_URL` is required; the alias table comes from `DOMAIN_ALIASES` or
//! `ALIASES_FILE`.

use domain_overlay::application::services::{PRIMARY_NETWORK_ID, SiteService};
use domain_overlay::config::{self, Config};
use domain_overlay::infrastructure::cache::NullCache;
use domain_overlay::infrastructure::persistence::PgSiteRepository;
use domain_overlay::overlay::{
    AliasRegistry, DomainOverlay, HomeUrlFilters, RedirectRule, RequestPath, UrlMasker,
    redirect::JOIN_PATH,
};
use domain_overlay::server::connect_pool;
use domain_overlay::web::home_url::home_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing domain-overlay.
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
    /// Manage registry sites
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },

    /// Inspect the alias table
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },

    /// Dry-run the overlay for a host
    Resolve {
        /// Host header value, exactly as a client would send it
        host: String,

        /// Request path
        #[arg(short, long, default_value = "/")]
        path: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Site management subcommands.
#[derive(Subcommand)]
enum SiteAction {
    /// List live sites
    List,

    /// Register a new site
    Add {
        /// Canonical domain (e.g., "blog.example")
        #[arg(short, long)]
        domain: Option<String>,

        /// Site path under the domain
        #[arg(short, long)]
        path: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Alias table subcommands.
#[derive(Subcommand)]
enum AliasAction {
    /// Check every alias resolves to a live site
    Check,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    let pool = connect_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Site { action } => handle_site_action(action, &pool).await?,
        Commands::Alias { action } => handle_alias_action(action, &config, &pool).await?,
        Commands::Resolve { host, path } => resolve(&config, &pool, &host, &path).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn site_service(pool: &PgPool) -> SiteService {
    SiteService::new(
        Arc::new(PgSiteRepository::new(Arc::new(pool.clone()))),
        Arc::new(NullCache::new()),
    )
}

/// Dispatches site management commands.
async fn handle_site_action(action: SiteAction, pool: &PgPool) -> Result<()> {
    let service = site_service(pool);

    match action {
        SiteAction::List => list_sites(&service).await?,
        SiteAction::Add { domain, path, yes } => add_site(&service, domain, path, yes).await?,
    }

    Ok(())
}

/// Lists live sites.
///
/// # Output Format
///
/// ```text
/// 📋 Sites
///
///   ID  Domain                         Path             Network
///   ──────────────────────────────────────────────────────────────
///   1   internal.example               /                1
///   4   internal.example               /artist/         1
/// ```
async fn list_sites(service: &SiteService) -> Result<()> {
    println!("{}", "📋 Sites".bright_blue().bold());
    println!();

    let sites = service
        .list_sites()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list sites: {}", e))?;

    if sites.is_empty() {
        println!("{}", "  No sites found".yellow());
        println!();
        println!(
            "  Register one with: {} admin site add",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<16} {:<8}",
        "ID".bright_white().bold(),
        "Domain".bright_white().bold(),
        "Path".bright_white().bold(),
        "Network".bright_white().bold()
    );
    println!("  {}", "─".repeat(62).bright_black());

    for site in &sites {
        println!(
            "  {:<3} {:<30} {:<16} {}",
            site.id.to_string().bright_black(),
            site.domain.cyan(),
            site.path,
            site.network_id.to_string().bright_black()
        );
    }

    println!();
    println!("  Total: {}", sites.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Registers a site on the primary network with interactive prompts.
async fn add_site(
    service: &SiteService,
    domain: Option<String>,
    path: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🌐 Register Site".bright_blue().bold());
    println!();

    let domain = match domain {
        Some(d) => d,
        None => Input::new().with_prompt("Domain").interact_text()?,
    };

    let path = match path {
        Some(p) => p,
        None => Input::new()
            .with_prompt("Path")
            .with_initial_text("/")
            .interact_text()?,
    };

    println!();
    println!("{}", "Site details:".bright_white().bold());
    println!("  Domain:  {}", domain.cyan());
    println!("  Path:    {}", path.cyan());
    println!(
        "  Network: {}",
        PRIMARY_NETWORK_ID.to_string().bright_black()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Register this site?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let site = service
        .create_site(domain, path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register site: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Site registered with ID".green().bold(),
        site.id.to_string().bright_yellow().bold()
    );
    println!();
    println!("{}", "Map an alias to it with:".bright_white());
    println!(
        "  {}=\"your.alias={}\"",
        "DOMAIN_ALIASES".bright_cyan(),
        site.id
    );
    println!();

    Ok(())
}

/// Dispatches alias table commands.
async fn handle_alias_action(action: AliasAction, config: &Config, pool: &PgPool) -> Result<()> {
    match action {
        AliasAction::Check => check_aliases(config, pool).await,
    }
}

/// Resolves every configured alias against the registry.
///
/// Fails if any alias points at a missing site or the primary network is
/// missing.
async fn check_aliases(config: &Config, pool: &PgPool) -> Result<()> {
    println!("{}", "🔍 Checking alias table...".bright_blue());
    println!();

    let registry = AliasRegistry::from_entries(config.aliases.clone())?;
    if registry.is_empty() {
        println!("{}", "  No aliases configured".yellow());
        return Ok(());
    }

    let service = site_service(pool);
    let mut broken = 0usize;

    for entry in registry.entries() {
        match service.resolve(&entry.hostname, entry.site_id).await {
            Ok(context) => println!(
                "  {} {:<30} → site {} ({})",
                "OK".green().bold(),
                entry.hostname.cyan(),
                entry.site_id,
                context.origin_domain().bright_black()
            ),
            Err(e) => {
                broken += 1;
                println!(
                    "  {} {:<30} → site {} ({})",
                    "FAIL".red().bold(),
                    entry.hostname.cyan(),
                    entry.site_id,
                    e.to_string().red()
                );
            }
        }
    }

    println!();
    if broken > 0 {
        anyhow::bail!("{} of {} aliases are broken", broken, registry.len());
    }

    println!("{}", "✅ All aliases resolve".green().bold());
    Ok(())
}

/// Shows what the overlay would do with a request for `host` and `path`.
async fn resolve(config: &Config, pool: &PgPool, host: &str, path: &str) -> Result<()> {
    println!("{}", "🧭 Overlay Dry Run".bright_blue().bold());
    println!();

    let overlay = DomainOverlay::new(
        AliasRegistry::from_entries(config.aliases.clone())?,
        RedirectRule::new(JOIN_PATH, config.join_redirect_url.clone()),
    );
    let service = site_service(pool);

    println!("  Host: {}", host.cyan());
    println!("  Path: {}", path.cyan());
    println!();

    let Some(context) = overlay
        .resolve_host(&service, host)
        .await
        .map_err(|e| anyhow::anyhow!("Resolution failed: {}", e))?
    else {
        println!(
            "{}",
            "  Not an active alias: request passes through untouched".yellow()
        );
        return Ok(());
    };

    println!(
        "  Site:    {} ({})",
        context.site().id.to_string().bright_white().bold(),
        context.origin_domain().bright_black()
    );
    println!(
        "  Network: {}",
        context.network().id.to_string().bright_black()
    );

    if let Some(redirect) = overlay.redirect_rule().check(&RequestPath::new(path)) {
        println!(
            "  {} {}",
            "301 →".bright_yellow().bold(),
            redirect.location()
        );
        return Ok(());
    }

    let masker = UrlMasker::for_context(&context);
    let mut filters = HomeUrlFilters::default();
    filters.add(move |url| masker.mask(url));

    println!(
        "  Home URL: {}",
        home_url(context.site(), &config.home_scheme, path, &filters).bright_green()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let sites_count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM sites WHERE deleted = FALSE")
                    .fetch_one(pool)
                    .await?;

            let networks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM networks")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Sites:      {}",
                sites_count.to_string().bright_green().bold()
            );
            println!(
                "  Networks:   {}",
                networks_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
