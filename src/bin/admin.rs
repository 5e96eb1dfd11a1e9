//! CLI administration tool for taqui.
//!
//! Inspects and creates links and renders caption images without going
//! through the HTTP API. Uses the same environment configuration as the
//! server.
//!
//! # Usage
//!
//! ```bash
//! # Show a stored link
//! cargo run --bin admin -- link get ab12cd
//!
//! # Create a link (random key)
//! cargo run --bin admin -- link create --url https://example.com --contexto "tá aqui"
//!
//! # Create or overwrite a link under a chosen key
//! cargo run --bin admin -- link create --key promo --url https://example.com --contexto oi
//!
//! # Render a caption image to a file
//! cargo run --bin admin -- image render --text "tá aqui" --out caption.png
//!
//! # Check storage
//! cargo run --bin admin -- db check
//! ```

use taqui::application::services::LinkService;
use taqui::config::{self, Config};
use taqui::error::AppError;
use taqui::infrastructure::imaging::CaptionCompositor;
use taqui::infrastructure::persistence::build_link_repository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::PathBuf;

/// CLI tool for managing taqui.
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
    /// Inspect and create links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Caption image tools
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Storage operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show the link stored under a key
    Get {
        key: String,
    },

    /// Create a link
    Create {
        /// Destination URL
        #[arg(short, long)]
        url: String,

        /// Caption shown on the redirect page
        #[arg(short, long)]
        contexto: String,

        /// Explicit key (random if omitted; overwrites an existing link)
        #[arg(short, long)]
        key: Option<String>,

        /// Skip overwrite confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Image subcommands.
#[derive(Subcommand)]
enum ImageAction {
    /// Render a caption over the template and write it as PNG
    Render {
        #[arg(short, long)]
        text: String,

        #[arg(short, long, default_value = "caption.png")]
        out: PathBuf,
    },
}

/// Storage subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check that link storage is reachable
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config).await?,
        Commands::Image { action } => handle_image_action(action, &config)?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

async fn link_service(config: &Config) -> Result<LinkService> {
    let repository = build_link_repository(config)
        .await
        .context("Failed to open link storage")?;
    Ok(LinkService::new(repository, config.public_base_url.clone()))
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, config: &Config) -> Result<()> {
    let service = link_service(config).await?;

    match action {
        LinkAction::Get { key } => show_link(&service, &key).await?,
        LinkAction::Create {
            url,
            contexto,
            key,
            yes,
        } => create_link(&service, &url, &contexto, key, yes).await?,
    }

    Ok(())
}

async fn show_link(service: &LinkService, key: &str) -> Result<()> {
    match service.resolve(key).await {
        Ok(link) => {
            println!("{}", "🔗 Link".bright_blue().bold());
            println!();
            println!("  Key:      {}", link.key.cyan());
            println!("  URL:      {}", link.url.bright_white());
            println!("  Contexto: {}", link.contexto.bright_yellow());
            println!("  Short:    {}", service.short_url(&link.key).green());
            println!();
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("❌ No link stored under '{}'", key).red());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to load link: {}", e)),
    }
}

/// Creates a link, asking before overwriting an explicit key that exists.
async fn create_link(
    service: &LinkService,
    url: &str,
    contexto: &str,
    key: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✨ Create Link".bright_blue().bold());
    println!();

    let link = match key {
        Some(key) => {
            let exists = match service.resolve(&key).await {
                Ok(_) => true,
                Err(AppError::NotFound { .. }) => false,
                Err(e) => return Err(anyhow::anyhow!("Failed to check key: {}", e)),
            };

            if exists && !skip_confirm {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Key '{}' already exists. Overwrite?", key))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            service
                .create_link_with_key(&key, url, contexto)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?
        }
        None => service
            .create_link(url, contexto)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?,
    };

    println!("{}", "✅ Link created".green().bold());
    println!();
    println!("  Key:   {}", link.key.cyan());
    println!("  Short: {}", service.short_url(&link.key).bright_yellow());
    println!();

    Ok(())
}

/// Dispatches image commands.
fn handle_image_action(action: ImageAction, config: &Config) -> Result<()> {
    match action {
        ImageAction::Render { text, out } => {
            let compositor =
                CaptionCompositor::new(&config.template_image_path, config.fonts_dir.as_deref());

            let png = compositor
                .compose(&text)
                .map_err(|e| anyhow::anyhow!("Failed to render caption: {}", e))?;

            std::fs::write(&out, &png)
                .with_context(|| format!("Failed to write {}", out.display()))?;

            println!(
                "{} {} ({} bytes)",
                "✅ Wrote".green().bold(),
                out.display().to_string().cyan(),
                png.len()
            );
        }
    }

    Ok(())
}

/// Handles storage diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!(
                "{}",
                format!("🔍 Checking {} storage...", config.link_backend).bright_blue()
            );

            let service = link_service(config).await?;
            service
                .health_check()
                .await
                .map_err(|e| anyhow::anyhow!("Storage check failed: {}", e))?;

            println!("{}", "✅ Storage OK".green().bold());
        }
    }

    Ok(())
}
