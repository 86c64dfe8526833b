//! Comment command
//!
//! List stored comments.

use super::Settings;
use anyhow::Result;
use clap::Subcommand;
use press_core::comment::{Comment, CommentStatus};
use press_core::store::CommentStore;
use press_core::types::ArticleId;

/// Comment subcommands
#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// List comments
    List {
        /// Only comments on this article
        #[arg(long, short)]
        article: Option<u64>,

        /// Only comments awaiting review
        #[arg(long)]
        pending: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Limit number of comments
        #[arg(long, short, default_value = "20")]
        limit: usize,
    },
}

/// Execute the comment command
pub fn execute(cmd: CommentCommand, settings: &Settings) -> Result<()> {
    let storage = settings.open_storage()?;
    match cmd {
        CommentCommand::List {
            article,
            pending,
            json,
            limit,
        } => {
            let comments = match article {
                Some(id) => storage.list_by_article(ArticleId(id))?,
                None => storage.snapshot()?.comments,
            };
            let comments = filter_comments(comments, pending, limit);
            list_comments(&comments, json)
        }
    }
}

fn filter_comments(comments: Vec<Comment>, pending: bool, limit: usize) -> Vec<Comment> {
    comments
        .into_iter()
        .filter(|c| !pending || c.status == CommentStatus::Unaudited)
        .take(limit)
        .collect()
}

fn list_comments(comments: &[Comment], as_json: bool) -> Result<()> {
    use colored::Colorize;

    if comments.is_empty() {
        println!("No comments found.");
        return Ok(());
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(comments)?);
        return Ok(());
    }

    println!("{}", "Comments:".bold().underline());
    println!();
    for comment in comments {
        let id = comment
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = match comment.status {
            CommentStatus::Normal => comment.status.to_string().green(),
            _ => comment.status.to_string().yellow(),
        };
        println!(
            "  {} on article {} [{}] by {} at {}",
            id.cyan(),
            comment.article_id,
            status,
            comment.author.as_deref().unwrap_or("anonymous"),
            comment.created_at.format("%Y-%m-%d %H:%M:%S")
        );
        if let Some(pid) = comment.pid {
            println!("    {}", format!("reply to {}", pid).dimmed());
        }
        println!("    {}", comment.content);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_core::comment::CommentBuilder;

    fn comment(status: CommentStatus) -> Comment {
        CommentBuilder::new(ArticleId(1))
            .content("x")
            .status(status)
            .build()
            .unwrap()
    }

    #[test]
    fn test_filter_pending_and_limit() {
        let comments = vec![
            comment(CommentStatus::Normal),
            comment(CommentStatus::Unaudited),
            comment(CommentStatus::Unaudited),
        ];

        assert_eq!(filter_comments(comments.clone(), true, 10).len(), 2);
        assert_eq!(filter_comments(comments.clone(), false, 2).len(), 2);
        assert_eq!(filter_comments(comments, true, 1).len(), 1);
    }
}
