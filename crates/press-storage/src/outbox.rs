//! Outbox notifier
//!
//! Admin alerts are written as JSON files into an outbox directory. Delivery
//! is left to whatever picks the files up.

use chrono::{DateTime, Utc};
use press_core::article::Article;
use press_core::comment::Comment;
use press_core::error::{PressError, Result};
use press_core::store::Notifier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// One queued alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl OutboxMessage {
    /// Alert about a new comment
    pub fn new_comment(to: Vec<String>, article: &Article, comment: &Comment) -> Self {
        let author = comment.author.as_deref().unwrap_or("anonymous");
        let subject = format!("New comment on \"{}\"", article.title);
        let body = format!(
            "{} commented on {} ({}):\n\n{}\n\nStatus: {}",
            author,
            article.title,
            article.url(),
            comment.content,
            comment.status
        );
        Self {
            to,
            subject,
            body,
            created_at: Utc::now(),
        }
    }
}

/// Notifier writing alerts into an outbox directory
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    dir: PathBuf,
    admins: Vec<String>,
}

impl OutboxNotifier {
    /// Create a notifier, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>, admins: Vec<String>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, admins })
    }

    /// Outbox directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_message(&self, message: &OutboxMessage) -> Result<PathBuf> {
        let name = format!(
            "{}-{}",
            message.created_at.format("%Y%m%dT%H%M%S%.3f"),
            Uuid::new_v4().simple()
        );
        let temp_path = self.dir.join(format!(".{}.json.tmp", name));
        let final_path = self.dir.join(format!("{}.json", name));

        let mut writer = BufWriter::new(fs::File::create(&temp_path)?);
        serde_json::to_writer_pretty(&mut writer, message)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            PressError::Notify(format!("Failed to move message into outbox: {}", e))
        })?;
        Ok(final_path)
    }
}

impl Notifier for OutboxNotifier {
    fn notify_admins(&self, article: &Article, comment: &Comment) -> Result<()> {
        if self.admins.is_empty() {
            return Err(PressError::Notify("no admin addresses configured".to_string()));
        }
        let message = OutboxMessage::new_comment(self.admins.clone(), article, comment);
        let path = self.write_message(&message)?;
        debug!("Queued admin alert {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_core::comment::{CommentBuilder, CommentStatus};
    use press_core::types::ArticleId;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn fixtures() -> (Article, Comment) {
        let article = Article::new(ArticleId(5), "Hello");
        let comment = CommentBuilder::new(ArticleId(5))
            .content("nice post")
            .author(Some("bob".to_string()))
            .status(CommentStatus::Unaudited)
            .build()
            .unwrap();
        (article, comment)
    }

    fn outbox_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
            .collect()
    }

    #[test]
    fn test_writes_one_message_per_alert() {
        let temp_dir = TempDir::new().unwrap();
        let notifier =
            OutboxNotifier::new(temp_dir.path().join("outbox"), vec!["admin@example.com".into()])
                .unwrap();
        let (article, comment) = fixtures();

        notifier.notify_admins(&article, &comment).unwrap();
        notifier.notify_admins(&article, &comment).unwrap();

        let files = outbox_files(notifier.dir());
        assert_eq!(files.len(), 2);

        let message: OutboxMessage =
            serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
        assert_eq!(message.to, vec!["admin@example.com".to_string()]);
        assert_eq!(message.subject, "New comment on \"Hello\"");
        assert!(message.body.contains("bob commented"));
        assert!(message.body.contains("nice post"));
    }

    #[test]
    fn test_no_admins_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let notifier = OutboxNotifier::new(temp_dir.path(), Vec::new()).unwrap();
        let (article, comment) = fixtures();

        assert!(matches!(
            notifier.notify_admins(&article, &comment),
            Err(PressError::Notify(_))
        ));
        assert!(outbox_files(temp_dir.path()).is_empty());
    }
}
