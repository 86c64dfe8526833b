//! Admin notification dispatch
//!
//! Notifications are best effort: a failure is logged and dropped, and never
//! affects the comment that triggered it.

use crate::article::Article;
use crate::comment::Comment;
use crate::error::Result;
use crate::store::Notifier;
use tracing::{info, warn};

/// A pending alert about a new comment
#[derive(Debug, Clone)]
pub struct Notification {
    pub article: Article,
    pub comment: Comment,
}

impl Notification {
    /// Create a notification
    pub fn new(article: Article, comment: Comment) -> Self {
        Self { article, comment }
    }

    /// Deliver through the notifier, swallowing failures
    pub fn dispatch(self, notifier: &dyn Notifier) {
        if let Err(e) = notifier.notify_admins(&self.article, &self.comment) {
            warn!(
                "Failed to notify admins about comment {:?} on article {}: {}",
                self.comment.id, self.article.id, e
            );
        }
    }
}

/// Notifier that only writes to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_admins(&self, article: &Article, comment: &Comment) -> Result<()> {
        info!(
            "New {} comment {:?} on \"{}\" by {}",
            comment.status,
            comment.id,
            article.title,
            comment.author.as_deref().unwrap_or("anonymous")
        );
        Ok(())
    }
}
