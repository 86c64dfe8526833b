//! Comment policy engine
//!
//! An ordered chain of guards evaluated fresh for every submission. The
//! first failing guard decides the rejection; nothing is written until every
//! guard has passed.

use super::builder::CommentBuilder;
use super::model::{Comment, CommentStatus};
use super::validator::CommentValidator;
use crate::article::Article;
use crate::captcha::CaptchaToken;
use crate::error::Result;
use crate::options::{is_enabled, OptionKey};
use crate::store::{CaptchaValidator, ContentStore, OptionStore};
use crate::types::{ArticleId, CommentId};
use crate::user::User;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Machine code telling clients to ask the visitor to log in
pub const LOGIN_REQUIRED_CODE: u32 = 9;

/// Raw comment form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentSubmission {
    pub article_id: Option<i64>,
    pub pid: Option<i64>,
    pub nickname: Option<String>,
    pub content: Option<String>,
    pub email: Option<String>,
    pub wechat: Option<String>,
    pub qq: Option<String>,
    pub captcha: Option<CaptchaToken>,
}

/// Why a submission was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentRejection {
    /// Missing or non-positive article id
    InvalidArticle,
    /// Blank content
    EmptyContent,
    /// Content longer than the configured maximum
    ContentTooLong { max: usize },
    /// Captcha required and not answered correctly
    CaptchaIncorrect,
    /// No article with the given id
    ArticleNotFound,
    /// The article has comments switched off
    ArticleCommentsClosed,
    /// Comments are switched off site-wide
    CommentsDisabled,
    /// Anonymous comments are not accepted
    LoginRequired,
}

impl CommentRejection {
    /// Human-readable message, if the rejection carries one
    pub fn message(&self) -> Option<String> {
        match self {
            CommentRejection::InvalidArticle | CommentRejection::ArticleNotFound => None,
            CommentRejection::EmptyContent => Some("comment content cannot be empty".to_string()),
            CommentRejection::ContentTooLong { max } => Some(format!(
                "comment content cannot exceed {} characters",
                max
            )),
            CommentRejection::CaptchaIncorrect => Some("captcha incorrect".to_string()),
            CommentRejection::ArticleCommentsClosed => {
                Some("comments are closed for this article".to_string())
            }
            CommentRejection::CommentsDisabled => Some("commenting is disabled".to_string()),
            CommentRejection::LoginRequired => {
                Some("unauthenticated users may not comment".to_string())
            }
        }
    }

    /// Machine-readable code, if the rejection carries one
    pub fn code(&self) -> Option<u32> {
        match self {
            CommentRejection::LoginRequired => Some(LOGIN_REQUIRED_CODE),
            _ => None,
        }
    }
}

impl fmt::Display for CommentRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.write_str(&message),
            None => write!(f, "{:?}", self),
        }
    }
}

/// Result of evaluating a submission
#[derive(Debug, Clone)]
pub enum Verdict {
    /// All guards passed; the comment is ready to persist
    Accepted { article: Article, comment: Comment },
    /// A guard refused the submission
    Rejected(CommentRejection),
}

/// Evaluates comment submissions against site options
pub struct CommentPolicy {
    content: Arc<dyn ContentStore>,
    options: Arc<dyn OptionStore>,
    captcha: Arc<dyn CaptchaValidator>,
    validator: CommentValidator,
}

macro_rules! reject {
    ($reason:expr) => {{
        let reason = $reason;
        debug!("Comment rejected: {:?}", reason);
        return Ok(Verdict::Rejected(reason));
    }};
}

impl CommentPolicy {
    /// Create a policy over the given collaborators
    pub fn new(
        content: Arc<dyn ContentStore>,
        options: Arc<dyn OptionStore>,
        captcha: Arc<dyn CaptchaValidator>,
        validator: CommentValidator,
    ) -> Self {
        Self {
            content,
            options,
            captcha,
            validator,
        }
    }

    /// Run the guard chain and build the comment
    ///
    /// Guards run in this order: article id, content, captcha, article
    /// existence, article comment flag, site comment flag, anonymous access.
    /// Store failures are returned as errors; refusals are `Verdict::Rejected`.
    pub fn evaluate(&self, submission: CommentSubmission, user: Option<&User>) -> Result<Verdict> {
        let Some(article_id) = submission.article_id.and_then(ArticleId::from_raw) else {
            reject!(CommentRejection::InvalidArticle);
        };

        let content = match self.validator.validate_content(submission.content.as_deref()) {
            Ok(escaped) => escaped,
            Err(reason) => reject!(reason),
        };

        if self.enabled(OptionKey::CommentCaptchaEnable)? {
            let passed = submission
                .captcha
                .as_ref()
                .is_some_and(|token| self.captcha.validate(token));
            if !passed {
                reject!(CommentRejection::CaptchaIncorrect);
            }
        }

        let Some(article) = self.content.find_by_id(article_id)? else {
            reject!(CommentRejection::ArticleNotFound);
        };

        if !article.comment_enable {
            reject!(CommentRejection::ArticleCommentsClosed);
        }

        if !self.enabled(OptionKey::CommentEnable)? {
            reject!(CommentRejection::CommentsDisabled);
        }

        if !self.enabled(OptionKey::CommentAnonymousEnable)? && user.is_none() {
            reject!(CommentRejection::LoginRequired);
        }

        let status = if self.enabled(OptionKey::CommentReviewEnable)? {
            CommentStatus::Unaudited
        } else {
            CommentStatus::Normal
        };

        let comment = CommentBuilder::new(article_id)
            .parent(submission.pid.and_then(CommentId::from_raw))
            .content(content)
            .author(submission.nickname)
            .email(submission.email)
            .wechat(submission.wechat)
            .qq(submission.qq)
            .user(user)
            .status(status)
            .build()?;

        Ok(Verdict::Accepted { article, comment })
    }

    fn enabled(&self, key: OptionKey) -> Result<bool> {
        is_enabled(self.options.as_ref(), key)
    }
}
