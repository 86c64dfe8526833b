//! Article controller
//!
//! Ties lookup, the visibility gate and the comment policy to the stores.
//! Everything here is synchronous; callers decide where notifications run.

use crate::article::{ArticleLookup, ArticleResponse, VisibilityGate};
use crate::comment::{CommentPolicy, CommentResponse, CommentSubmission, CommentValidator, Verdict};
use crate::config::Config;
use crate::error::Result;
use crate::notify::Notification;
use crate::store::{
    CaptchaValidator, CategoryStore, CommentStore, ContentStore, MenuStore, Notifier,
    OptionStore, SessionResolver, ViewRenderer,
};
use std::sync::Arc;
use tracing::info;

/// Collaborators the controller delegates to
#[derive(Clone)]
pub struct Services {
    pub content: Arc<dyn ContentStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub comments: Arc<dyn CommentStore>,
    pub options: Arc<dyn OptionStore>,
    pub menus: Arc<dyn MenuStore>,
    pub sessions: Arc<dyn SessionResolver>,
    pub captcha: Arc<dyn CaptchaValidator>,
    pub notifier: Arc<dyn Notifier>,
    pub renderer: Arc<dyn ViewRenderer>,
}

/// Outcome of a comment submission
#[derive(Debug, Clone)]
pub struct CommentOutcome {
    /// Body to send back
    pub response: CommentResponse,
    /// Alert to dispatch after responding, for accepted comments
    pub notification: Option<Notification>,
}

/// Handles article page and comment requests
pub struct ArticleController {
    lookup: ArticleLookup,
    gate: VisibilityGate,
    policy: CommentPolicy,
    services: Services,
}

impl ArticleController {
    /// Create a controller
    pub fn new(services: Services, config: &Config) -> Self {
        let lookup = ArticleLookup::new(services.content.clone());
        let gate = VisibilityGate::new(
            services.content.clone(),
            services.categories.clone(),
            services.comments.clone(),
            services.menus.clone(),
            services.renderer.clone(),
            config.seo.description_length,
        );
        let policy = CommentPolicy::new(
            services.content.clone(),
            services.options.clone(),
            services.captcha.clone(),
            config
                .comment
                .max_length
                .map(CommentValidator::with_max_length)
                .unwrap_or_default(),
        );

        Self {
            lookup,
            gate,
            policy,
            services,
        }
    }

    /// Answer `GET /article/{id-or-slug}`
    pub fn view_article(&self, segment: &str) -> Result<ArticleResponse> {
        match self.lookup.resolve(segment)? {
            Some(article) => self.gate.show(article),
            None => Ok(ArticleResponse::NotFound),
        }
    }

    /// Answer a comment submission
    ///
    /// On acceptance the counters are incremented before the comment is
    /// saved: the article's comment count, then the parent's reply count.
    pub fn post_comment(
        &self,
        submission: CommentSubmission,
        session_token: Option<&str>,
    ) -> Result<CommentOutcome> {
        let user = self.services.sessions.current_user(session_token)?;

        let (article, comment) = match self.policy.evaluate(submission, user.as_ref())? {
            Verdict::Accepted { article, comment } => (article, comment),
            Verdict::Rejected(reason) => {
                return Ok(CommentOutcome {
                    response: CommentResponse::rejected(&reason),
                    notification: None,
                })
            }
        };

        self.services.content.inc_comment_count(article.id)?;
        if let Some(pid) = comment.pid {
            self.services.comments.inc_reply_count(pid)?;
        }
        let saved = self.services.comments.save(comment)?;

        info!(
            "Accepted {} comment {:?} on article {}",
            saved.status, saved.id, article.id
        );

        Ok(CommentOutcome {
            response: CommentResponse::accepted(&saved, user.as_ref()),
            notification: Some(Notification::new(article, saved)),
        })
    }

    /// Notifier for dispatching accepted-comment alerts
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.services.notifier.clone()
    }
}
