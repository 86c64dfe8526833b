//! Init command
//!
//! Write `press.toml` and a sample site.

use super::{Settings, DEFAULT_CONFIG_FILE};
use anyhow::{Context, Result};
use clap::Args;
use press_core::config::Config;
use press_storage::{FileSystemStorage, SiteSnapshot};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Use default settings (non-interactive)
    #[arg(long)]
    pub defaults: bool,

    /// Force overwrite existing configuration and site
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Data directory, relative to the config file
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

/// Execute the init command
pub fn execute(args: InitArgs, config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let project_dir = args
        .path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_dir.join(DEFAULT_CONFIG_FILE));

    println!("Initializing press in {}...", project_dir.display());

    if config_path.exists() && !args.force {
        eprintln!(
            "{} {} already exists. Use --force to reinitialize.",
            "⚠".yellow(),
            config_path.display()
        );
        return Ok(());
    }

    let mut config = Config::default();
    config.storage.data_dir = Some(args.data_dir.clone());
    if !args.defaults {
        prompt_server(&mut config)?;
    }

    let token = write_site(&config_path, &config, args.force)?;

    println!(
        "{} Wrote {}",
        "✓".green(),
        config_path.display()
    );
    println!("\n{}", "Next steps:".bold());
    println!("  1. Start the server:");
    println!("     {}", "press serve".cyan());
    println!("  2. Open an article:");
    println!(
        "     {}",
        format!("http://{}/article/welcome", config.bind_address()).cyan()
    );
    if let Some(token) = token {
        println!(
            "\nAdmin session token (send as 'Authorization: Bearer <token>'): {}",
            token.dimmed()
        );
    }

    Ok(())
}

fn prompt_server(config: &mut Config) -> Result<()> {
    use dialoguer::Input;

    config.server.site_name = Input::new()
        .with_prompt("Site name")
        .default(config.server.site_name.clone())
        .interact_text()?;
    config.server.port = Input::new()
        .with_prompt("Port")
        .default(config.server.port)
        .interact_text()?;
    Ok(())
}

/// Write the config and, unless one exists, the sample site
///
/// Returns the sample admin's session token when a site was written.
fn write_site(config_path: &Path, config: &Config, force: bool) -> Result<Option<String>> {
    use colored::Colorize;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(config_path, config.to_toml_string()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let settings = Settings::load(Some(config_path))?;
    let data_dir = settings.data_dir();
    if FileSystemStorage::exists(&data_dir) && !force {
        println!(
            "{} Keeping existing site in {}",
            "⚠".yellow(),
            data_dir.display()
        );
        return Ok(None);
    }

    let snapshot = SiteSnapshot::sample();
    let token = snapshot
        .users
        .iter()
        .find_map(|u| u.session_token.clone());
    FileSystemStorage::init_with(&data_dir, snapshot)
        .with_context(|| format!("Failed to create site in {}", data_dir.display()))?;
    println!(
        "{} Created sample site in {}",
        "✓".green(),
        data_dir.display()
    );
    Ok(token)
}
