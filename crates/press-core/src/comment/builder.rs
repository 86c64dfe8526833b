//! Comment builder for fluent API

use super::model::{Comment, CommentStatus};
use crate::error::{PressError, Result};
use crate::types::{ArticleId, CommentId};
use crate::user::User;
use chrono::Utc;

/// Builder for new comments
pub struct CommentBuilder {
    article_id: ArticleId,
    pid: Option<CommentId>,
    content: Option<String>,
    author: Option<String>,
    email: Option<String>,
    wechat: Option<String>,
    qq: Option<String>,
    user: Option<User>,
    status: CommentStatus,
}

impl CommentBuilder {
    /// Start a comment on an article
    pub fn new(article_id: ArticleId) -> Self {
        Self {
            article_id,
            pid: None,
            content: None,
            author: None,
            email: None,
            wechat: None,
            qq: None,
            user: None,
            status: CommentStatus::Unaudited,
        }
    }

    /// Set already escaped content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Reply to another comment
    pub fn parent(mut self, pid: Option<CommentId>) -> Self {
        self.pid = pid;
        self
    }

    /// Free-text nickname; ignored when a user is attached
    pub fn author(mut self, author: Option<String>) -> Self {
        self.author = non_blank(author);
        self
    }

    /// Contact e-mail
    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = non_blank(email);
        self
    }

    /// WeChat handle
    pub fn wechat(mut self, wechat: Option<String>) -> Self {
        self.wechat = non_blank(wechat);
        self
    }

    /// QQ number
    pub fn qq(mut self, qq: Option<String>) -> Self {
        self.qq = non_blank(qq);
        self
    }

    /// Attach the logged-in author
    pub fn user(mut self, user: Option<&User>) -> Self {
        self.user = user.cloned();
        self
    }

    /// Set the initial status
    pub fn status(mut self, status: CommentStatus) -> Self {
        self.status = status;
        self
    }

    /// Build the comment
    ///
    /// A session user overrides the supplied nickname with their profile
    /// nickname and attaches their id.
    pub fn build(self) -> Result<Comment> {
        let content = self.content.ok_or_else(|| {
            PressError::Validation("Comment content is required".to_string())
        })?;

        let (user_id, author) = match &self.user {
            Some(user) => (Some(user.id), Some(user.nickname.clone())),
            None => (None, self.author),
        };

        Ok(Comment {
            id: None,
            pid: self.pid,
            article_id: self.article_id,
            user_id,
            author,
            content,
            email: self.email,
            wechat: self.wechat,
            qq: self.qq,
            status: self.status,
            reply_count: 0,
            created_at: Utc::now(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
