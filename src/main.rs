// src/main.rs
// =============================================================================
// This is the entry point of the repo-gallery CLI.
//
// What happens here:
// 1. Set up logging (level from REPO_GALLERY_LOG_LEVEL, output to stderr)
// 2. Parse command-line arguments using clap
// 3. Load the gallery for the configured user
// 4. Render it to HTML, or hand it to the interactive session
// 5. Exit with proper code (0 = loaded cleanly, 1 = page shows an error,
//    2 = internal error)
// =============================================================================

mod cli;
mod config;
mod error;
mod gallery;
mod github;
mod page;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::GalleryConfig;
use gallery::Gallery;
use github::GitHubClient;

#[tokio::main]
async fn main() {
    init_tracing_subscriber();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing_subscriber() {
    let env_var = format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase().replace('-', "_")
    );
    let mut filter = EnvFilter::try_from_env(&env_var).unwrap_or_else(|_| EnvFilter::new("warn"));
    for directive in ["reqwest=warn", "hyper=warn", "rustls=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.gallery.to_config();

    match cli.command {
        Commands::Render { filter, open, output } => {
            handle_render(config, filter.as_deref(), open.as_deref(), output).await
        }
        Commands::Browse => handle_browse(config).await,
    }
}

// Handles the 'render' subcommand
async fn handle_render(
    config: GalleryConfig,
    filter: Option<&str>,
    open: Option<&str>,
    output: Option<PathBuf>,
) -> Result<i32> {
    let client = GitHubClient::new(&config).context("Failed to set up GitHub client")?;
    let mut gallery = Gallery::new(config);
    gallery.load(&client).await;

    if let Some(search) = filter {
        let visible = gallery.filter(search);
        tracing::info!(search, visible, "applied filter");
    }
    if let Some(name) = open {
        gallery.open_repository(&client, name).await;
    }

    let html = gallery.to_html();
    match output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }

    Ok(if gallery.has_error() { 1 } else { 0 })
}

// Handles the 'browse' subcommand
async fn handle_browse(config: GalleryConfig) -> Result<i32> {
    let client = GitHubClient::new(&config).context("Failed to set up GitHub client")?;
    let mut gallery = Gallery::new(config);

    println!("Loading repositories for {}...", client.username());
    gallery.load(&client).await;

    session::run_session(&mut gallery, &client).await?;
    Ok(0)
}
