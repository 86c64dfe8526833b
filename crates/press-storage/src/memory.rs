//! In-memory store

use crate::snapshot::SiteSnapshot;
use press_core::article::{Article, ArticleCategory, Menu};
use press_core::comment::Comment;
use press_core::error::{PressError, Result};
use press_core::store::{
    CategoryStore, CommentStore, ContentStore, MenuStore, OptionStore, SessionResolver,
};
use press_core::types::{ArticleId, CommentId};
use press_core::user::User;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Store keeping a whole site in memory
///
/// Counter increments happen under the write lock, so concurrent requests
/// never lose an update.
#[derive(Debug, Default)]
pub struct MemoryStore {
    site: RwLock<SiteSnapshot>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given snapshot
    pub fn from_snapshot(snapshot: SiteSnapshot) -> Self {
        Self {
            site: RwLock::new(snapshot),
        }
    }

    /// Copy of the current site
    pub fn snapshot(&self) -> Result<SiteSnapshot> {
        Ok(self.read()?.clone())
    }

    /// Take the site out of the store
    pub fn into_snapshot(self) -> Result<SiteSnapshot> {
        self.site
            .into_inner()
            .map_err(|_| PressError::Store("site lock poisoned".to_string()))
    }

    /// Swap in a whole site
    pub(crate) fn replace(&self, snapshot: SiteSnapshot) -> Result<()> {
        *self.write()? = snapshot;
        Ok(())
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, SiteSnapshot>> {
        self.site
            .read()
            .map_err(|_| PressError::Store("site lock poisoned".to_string()))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, SiteSnapshot>> {
        self.site
            .write()
            .map_err(|_| PressError::Store("site lock poisoned".to_string()))
    }

    /// Insert or replace an article
    pub fn put_article(&self, article: Article) -> Result<()> {
        let mut site = self.write()?;
        match site.articles.iter_mut().find(|a| a.id == article.id) {
            Some(existing) => *existing = article,
            None => site.articles.push(article),
        }
        Ok(())
    }

    /// Insert or replace a user
    pub fn put_user(&self, user: User) -> Result<()> {
        let mut site = self.write()?;
        match site.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => site.users.push(user),
        }
        Ok(())
    }
}

impl ContentStore for MemoryStore {
    fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>> {
        Ok(self.read()?.articles.iter().find(|a| a.id == id).cloned())
    }

    fn find_first_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        Ok(self
            .read()?
            .articles
            .iter()
            .find(|a| a.slug.as_deref() == Some(slug))
            .cloned())
    }

    fn inc_view_count(&self, id: ArticleId) -> Result<()> {
        let mut site = self.write()?;
        let article = site
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| PressError::ArticleNotFound(id.to_string()))?;
        article.view_count += 1;
        Ok(())
    }

    fn inc_comment_count(&self, id: ArticleId) -> Result<()> {
        let mut site = self.write()?;
        let article = site
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| PressError::ArticleNotFound(id.to_string()))?;
        article.comment_count += 1;
        Ok(())
    }

    fn list(&self) -> Result<Vec<Article>> {
        Ok(self.read()?.articles.clone())
    }
}

impl CategoryStore for MemoryStore {
    fn find_active_by_article(&self, id: ArticleId) -> Result<Vec<ArticleCategory>> {
        let site = self.read()?;
        Ok(site
            .category_links
            .iter()
            .filter(|link| link.article_id == id)
            .filter_map(|link| site.categories.iter().find(|c| c.id == link.category_id))
            .filter(|c| c.active)
            .cloned()
            .collect())
    }
}

impl CommentStore for MemoryStore {
    fn inc_reply_count(&self, id: CommentId) -> Result<()> {
        let mut site = self.write()?;
        match site.comments.iter_mut().find(|c| c.id == Some(id)) {
            Some(comment) => comment.reply_count += 1,
            None => warn!("Reply to unknown comment {}, reply count unchanged", id),
        }
        Ok(())
    }

    fn save(&self, mut comment: Comment) -> Result<Comment> {
        let mut site = self.write()?;
        let next = site
            .comments
            .iter()
            .filter_map(|c| c.id)
            .map(|id| id.0)
            .max()
            .unwrap_or(0)
            + 1;
        comment.id = Some(CommentId(next));
        site.comments.push(comment.clone());
        debug!("Saved comment {} on article {}", next, comment.article_id);
        Ok(comment)
    }

    fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        Ok(self
            .read()?
            .comments
            .iter()
            .find(|c| c.id == Some(id))
            .cloned())
    }

    fn list_by_article(&self, id: ArticleId) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .read()?
            .comments
            .iter()
            .filter(|c| c.article_id == id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }
}

impl OptionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.options.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write()?
            .options
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl MenuStore for MemoryStore {
    fn list_menus(&self) -> Result<Vec<Menu>> {
        Ok(self.read()?.menus.clone())
    }
}

impl SessionResolver for MemoryStore {
    fn current_user(&self, token: Option<&str>) -> Result<Option<User>> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        Ok(self
            .read()?
            .users
            .iter()
            .find(|u| u.is_active() && u.session_token.as_deref() == Some(token))
            .cloned())
    }
}
