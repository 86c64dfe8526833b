//! Comment data models

use crate::types::{ArticleId, CommentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reader comment on an article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Assigned by the store on save
    #[serde(default)]
    pub id: Option<CommentId>,
    /// Comment this one replies to
    #[serde(default)]
    pub pid: Option<CommentId>,
    pub article_id: ArticleId,
    /// Set when the author was logged in
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Display name
    #[serde(default)]
    pub author: Option<String>,
    /// HTML-escaped content
    pub content: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub wechat: Option<String>,
    #[serde(default)]
    pub qq: Option<String>,
    #[serde(default)]
    pub status: CommentStatus,
    #[serde(default)]
    pub reply_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Publicly visible
    pub fn is_normal(&self) -> bool {
        self.status == CommentStatus::Normal
    }

    /// Whether this comment replies to another
    pub fn is_reply(&self) -> bool {
        self.pid.is_some()
    }

    /// Projection without contact details
    pub fn view(&self) -> CommentView {
        CommentView {
            id: self.id,
            pid: self.pid,
            article_id: self.article_id,
            user_id: self.user_id,
            author: self.author.clone(),
            content: self.content.clone(),
            status: self.status,
            reply_count: self.reply_count,
            created_at: self.created_at,
        }
    }
}

/// Moderation state of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    /// Visible to everyone
    Normal,
    /// Waiting for moderation
    #[default]
    Unaudited,
    /// Removed by a moderator
    Trash,
    /// Flagged as spam
    Spam,
}

impl std::fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommentStatus::Normal => write!(f, "normal"),
            CommentStatus::Unaudited => write!(f, "unaudited"),
            CommentStatus::Trash => write!(f, "trash"),
            CommentStatus::Spam => write!(f, "spam"),
        }
    }
}

/// Comment fields that may be shown to other readers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Option<CommentId>,
    pub pid: Option<CommentId>,
    pub article_id: ArticleId,
    pub user_id: Option<UserId>,
    pub author: Option<String>,
    pub content: String,
    pub status: CommentStatus,
    pub reply_count: u64,
    pub created_at: DateTime<Utc>,
}
