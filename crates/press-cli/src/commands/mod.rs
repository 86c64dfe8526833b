//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod article;
pub mod comment;
pub mod config;
pub mod init;
pub mod option;
pub mod serve;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use press_core::config::Config;
use press_storage::{default_data_dir, FileSystemStorage};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "press.toml";

/// press - article pages and comment intake for a small CMS
#[derive(Debug, Parser)]
#[command(name = "press")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve article pages and accept comments
    Serve(serve::ServeArgs),

    /// Write a config file and a sample site
    Init(init::InitArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),

    /// Inspect articles
    #[command(subcommand)]
    Article(article::ArticleCommand),

    /// Inspect comments
    #[command(subcommand)]
    Comment(comment::CommentCommand),

    /// Read and change site options
    #[command(subcommand, name = "option")]
    Opt(option::OptionCommand),
}

/// Configuration plus the directory relative paths resolve against
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    /// File the config came from, if any
    pub path: Option<PathBuf>,
    base_dir: PathBuf,
}

impl Settings {
    /// Load from an explicit path, else `./press.toml`, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                candidate.exists().then_some(candidate)
            }
        };

        let config = match &path {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => {
                debug!("No config file, using defaults");
                Config::default()
            }
        };

        let base_dir = path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            config,
            path,
            base_dir,
        })
    }

    /// Site data directory
    pub fn data_dir(&self) -> PathBuf {
        match &self.config.storage.data_dir {
            Some(dir) => self.base_dir.join(dir),
            None => default_data_dir(),
        }
    }

    /// Outbox directory for admin alerts
    pub fn outbox_dir(&self) -> PathBuf {
        self.data_dir().join(&self.config.notify.outbox_dir)
    }

    /// Open the site storage, which must already exist
    pub fn open_storage(&self) -> Result<FileSystemStorage> {
        let data_dir = self.data_dir();
        if !FileSystemStorage::exists(&data_dir) {
            anyhow::bail!(
                "No site found in {}. Run 'press init' first.",
                data_dir.display()
            );
        }
        FileSystemStorage::new(&data_dir)
            .with_context(|| format!("Failed to open site in {}", data_dir.display()))
    }
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();

    // Dispatch to command handler
    match cli.command {
        Commands::Init(args) => init::execute(args, config_path),
        Commands::Serve(args) => serve::execute(args, Settings::load(config_path)?),
        Commands::Config(cmd) => config::execute(cmd, &Settings::load(config_path)?),
        Commands::Article(cmd) => article::execute(cmd, &Settings::load(config_path)?),
        Commands::Comment(cmd) => comment::execute(cmd, &Settings::load(config_path)?),
        Commands::Opt(cmd) => option::execute(cmd, &Settings::load(config_path)?),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_option_subcommand_name() {
        let cli = Cli::try_parse_from(["press", "option", "get", "article_comment_enable"]).unwrap();
        assert!(matches!(cli.command, Commands::Opt(_)));
    }

    #[test]
    fn test_relative_data_dir_follows_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("press.toml");
        fs::write(&path, "[storage]\ndata_dir = \"site\"\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.data_dir(), temp_dir.path().join("site"));
        assert_eq!(settings.outbox_dir(), temp_dir.path().join("site").join("outbox"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Settings::load(Some(&temp_dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_open_storage_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("press.toml");
        fs::write(&path, "[storage]\ndata_dir = \"data\"\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert!(settings.open_storage().is_err());
    }
}
