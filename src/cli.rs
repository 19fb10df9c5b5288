// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Global options describe which gallery to build (user, API host, cutoff).
// Subcommands decide what to do with it:
// - render: build the page once and write it out as HTML
// - browse: keep the page in memory and drive it from stdin
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::{GalleryConfig, DEFAULT_API_BASE, DEFAULT_USERNAME};

#[derive(Parser, Debug)]
#[command(
    name = "repo-gallery",
    version,
    about = "Browse a GitHub user's profile and repositories",
    long_about = "repo-gallery fetches a GitHub user's profile and public repositories \
                  and presents them as a gallery page that can be filtered by name and \
                  opened for repository details."
)]
pub struct Cli {
    #[command(flatten)]
    pub gallery: GalleryArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GalleryArgs {
    /// GitHub user whose repositories are shown
    #[arg(long, global = true, default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Creation-date cutoff used with --exclude-before-cutoff (YYYY-MM-DD)
    #[arg(long, global = true, default_value = "2022-08-01")]
    pub cutoff: NaiveDate,

    /// Only list repositories created after the cutoff date
    #[arg(long, global = true)]
    pub exclude_before_cutoff: bool,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the gallery page and write it as HTML
    ///
    /// Example: repo-gallery render --filter guess --output gallery.html
    Render {
        /// Search text applied to the repository list
        #[arg(long)]
        filter: Option<String>,

        /// Repository to open in the detail view
        #[arg(long)]
        open: Option<String>,

        /// Write the page here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Explore the gallery interactively (type `help` once started)
    Browse,
}

impl GalleryArgs {
    pub fn to_config(&self) -> GalleryConfig {
        GalleryConfig {
            username: self.username.clone(),
            api_base: self.api_base.clone(),
            cutoff: self.cutoff,
            exclude_before_cutoff: self.exclude_before_cutoff,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["repo-gallery", "browse"]).unwrap();
        assert_eq!(cli.gallery.to_config(), GalleryConfig::default());
        assert!(matches!(cli.command, Commands::Browse));
    }

    #[test]
    fn test_render_with_options() {
        let cli = Cli::try_parse_from([
            "repo-gallery",
            "render",
            "--filter",
            "guess",
            "--open",
            "Guess-The-Word",
            "--exclude-before-cutoff",
            "--cutoff",
            "2023-01-31",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        let config = cli.gallery.to_config();
        assert!(config.exclude_before_cutoff);
        assert_eq!(config.cutoff, NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));

        match cli.command {
            Commands::Render { filter, open, output } => {
                assert_eq!(filter.as_deref(), Some("guess"));
                assert_eq!(open.as_deref(), Some("Guess-The-Word"));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_cutoff_rejected() {
        let result = Cli::try_parse_from(["repo-gallery", "--cutoff", "August", "browse"]);
        assert!(result.is_err());
    }
}
