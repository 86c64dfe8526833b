//! Config command
//!
//! Show and check press configuration.

use super::Settings;
use anyhow::Result;
use clap::Subcommand;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, settings: &Settings) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(settings, json),
        ConfigCommand::Validate => validate_config(settings),
    }
}

fn show_config(settings: &Settings, as_json: bool) -> Result<()> {
    use colored::Colorize;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&settings.config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    match &settings.path {
        Some(path) => println!("{}", path.display().to_string().dimmed()),
        None => println!("{}", "(defaults, no config file)".dimmed()),
    }
    println!("{}", format!("data: {}", settings.data_dir().display()).dimmed());
    println!();
    println!("{}", settings.config.to_toml_string()?);

    Ok(())
}

fn validate_config(settings: &Settings) -> Result<()> {
    use colored::Colorize;

    match settings.config.validate() {
        Ok(()) => {
            println!("{} Configuration is valid", "✓".green());
            if settings.path.is_none() {
                println!(
                    "{} No config file found; defaults are in effect",
                    "⚠".yellow()
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            Err(e.into())
        }
    }
}
