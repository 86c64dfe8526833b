//! Article command
//!
//! List the site's articles.

use super::Settings;
use anyhow::Result;
use clap::Subcommand;
use press_core::article::Article;
use press_core::store::ContentStore;

/// Article subcommands
#[derive(Debug, Subcommand)]
pub enum ArticleCommand {
    /// List all articles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the article command
pub fn execute(cmd: ArticleCommand, settings: &Settings) -> Result<()> {
    let storage = settings.open_storage()?;
    match cmd {
        ArticleCommand::List { json } => list_articles(&storage.list()?, json),
    }
}

fn list_articles(articles: &[Article], as_json: bool) -> Result<()> {
    use colored::Colorize;

    if articles.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(articles)?);
        return Ok(());
    }

    println!("{}", "Articles:".bold().underline());
    println!();
    for article in articles {
        let status = if article.is_normal() {
            article.status.to_string().green()
        } else {
            article.status.to_string().yellow()
        };
        println!(
            "  {:>4}  {:<8} {} {}",
            article.id.to_string().cyan(),
            status,
            article.title,
            article.url().dimmed()
        );
        let mut details = format!(
            "views {}, comments {}",
            article.view_count, article.comment_count
        );
        if let Some(target) = article.redirect_target() {
            details.push_str(&format!(", redirects to {}", target));
        }
        if !article.comment_enable {
            details.push_str(", comments closed");
        }
        println!("        {}", details.dimmed());
    }

    Ok(())
}
