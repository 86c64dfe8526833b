//! Option command
//!
//! Read and change site options.

use super::Settings;
use anyhow::Result;
use clap::Subcommand;
use press_core::options::{parse_bool, OptionKey};
use press_core::store::OptionStore;

/// Option subcommands
#[derive(Debug, Subcommand)]
pub enum OptionCommand {
    /// Show comment options and their effective values
    List,

    /// Print an option value
    Get {
        /// Option key, e.g. article_comment_enable
        key: String,
    },

    /// Set an option value
    Set {
        /// Option key
        key: String,
        /// New value
        value: String,
    },
}

/// Execute the option command
pub fn execute(cmd: OptionCommand, settings: &Settings) -> Result<()> {
    let storage = settings.open_storage()?;
    match cmd {
        OptionCommand::List => list_options(&storage),
        OptionCommand::Get { key } => get_option(&storage, &key),
        OptionCommand::Set { key, value } => set_option(&storage, &key, &value),
    }
}

fn list_options(store: &dyn OptionStore) -> Result<()> {
    use colored::Colorize;

    println!("{}", "Comment options:".bold().underline());
    println!();
    for key in OptionKey::ALL {
        let line = match store.get(key.as_str())? {
            Some(value) if parse_bool(&value) => format!("{} = {}", key, value).green(),
            Some(value) => format!("{} = {}", key, value).normal(),
            None => format!("{} (unset, disabled)", key).dimmed(),
        };
        println!("  {}", line);
    }
    Ok(())
}

fn get_option(store: &dyn OptionStore, key: &str) -> Result<()> {
    match store.get(key)? {
        Some(value) => println!("{}", value),
        None => {
            use colored::Colorize;
            eprintln!("{} {} is not set", "⚠".yellow(), key);
        }
    }
    Ok(())
}

fn set_option(store: &dyn OptionStore, key: &str, value: &str) -> Result<()> {
    use colored::Colorize;

    if OptionKey::from_name(key).is_none() {
        eprintln!("{} {} is not a known comment option", "⚠".yellow(), key);
    }
    store.set(key, value)?;
    println!("{} {} = {}", "✓".green(), key, value);
    Ok(())
}
