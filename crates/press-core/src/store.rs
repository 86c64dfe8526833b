//! Collaborator traits
//!
//! Everything the controller needs from the outside world goes through one of
//! these traits. Counter increments are single store operations; callers never
//! read a counter and write it back.

use crate::article::{Article, ArticleCategory, ArticlePage, Menu};
use crate::captcha::CaptchaToken;
use crate::comment::Comment;
use crate::error::Result;
use crate::options::parse_bool;
use crate::types::{ArticleId, CommentId};
use crate::user::User;

/// Article persistence
pub trait ContentStore: Send + Sync {
    /// Find an article by numeric id
    fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>>;

    /// Find the first article carrying this slug, in store order
    fn find_first_by_slug(&self, slug: &str) -> Result<Option<Article>>;

    /// Atomically add one to the view counter
    fn inc_view_count(&self, id: ArticleId) -> Result<()>;

    /// Atomically add one to the comment counter
    fn inc_comment_count(&self, id: ArticleId) -> Result<()>;

    /// All articles, in store order
    fn list(&self) -> Result<Vec<Article>>;
}

/// Category relations
pub trait CategoryStore: Send + Sync {
    /// Active categories the article belongs to
    fn find_active_by_article(&self, id: ArticleId) -> Result<Vec<ArticleCategory>>;
}

/// Comment persistence
pub trait CommentStore: Send + Sync {
    /// Atomically add one to a comment's reply counter
    ///
    /// An unknown id matches nothing and is not an error.
    fn inc_reply_count(&self, id: CommentId) -> Result<()>;

    /// Persist a new comment, returning it with its assigned id
    fn save(&self, comment: Comment) -> Result<Comment>;

    /// Find a comment by id
    fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>>;

    /// Comments on an article, oldest first
    fn list_by_article(&self, id: ArticleId) -> Result<Vec<Comment>>;
}

/// Key-value site options
pub trait OptionStore: Send + Sync {
    /// Raw option value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store an option value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Option value read as a boolean; `None` when absent
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.get(key)?.map(|v| parse_bool(&v)))
    }
}

/// Navigation menu entries
pub trait MenuStore: Send + Sync {
    /// All menu entries, in display order
    fn list_menus(&self) -> Result<Vec<Menu>>;
}

/// Maps a request's session credential to a user
pub trait SessionResolver: Send + Sync {
    /// The logged-in user for this token, if any
    fn current_user(&self, token: Option<&str>) -> Result<Option<User>>;
}

/// Checks captcha answers
pub trait CaptchaValidator: Send + Sync {
    /// Whether the answer is correct; a token is consumed by validation
    fn validate(&self, token: &CaptchaToken) -> bool;
}

/// Alerts site administrators
pub trait Notifier: Send + Sync {
    /// Tell administrators about a new comment
    fn notify_admins(&self, article: &Article, comment: &Comment) -> Result<()>;
}

/// Turns a view name and page attributes into a response body
pub trait ViewRenderer: Send + Sync {
    /// Render the named view
    fn render(&self, view: &str, page: &ArticlePage) -> Result<String>;
}
