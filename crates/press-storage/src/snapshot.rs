//! Serialized form of a whole site

use press_core::article::{Article, ArticleCategory, ArticleStatus, Menu};
use press_core::comment::Comment;
use press_core::error::{PressError, Result};
use press_core::options::OptionKey;
use press_core::types::{ArticleId, CategoryId, UserId};
use press_core::user::User;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Schema version written into new snapshots
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// Article-to-category relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    pub article_id: ArticleId,
    pub category_id: CategoryId,
}

/// Every record the site stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub schema_version: String,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub categories: Vec<ArticleCategory>,
    #[serde(default)]
    pub category_links: Vec<CategoryLink>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub menus: Vec<Menu>,
}

impl Default for SiteSnapshot {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            articles: Vec::new(),
            categories: Vec::new(),
            category_links: Vec::new(),
            comments: Vec::new(),
            options: BTreeMap::new(),
            users: Vec::new(),
            menus: Vec::new(),
        }
    }
}

impl SiteSnapshot {
    /// Reject snapshots written by an incompatible version
    pub fn check_version(&self) -> Result<()> {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        if major(&self.schema_version) != major(CURRENT_SCHEMA_VERSION) {
            return Err(PressError::Validation(format!(
                "Unsupported schema version: {}",
                self.schema_version
            )));
        }
        Ok(())
    }

    /// Demo content for a freshly initialized site
    ///
    /// Comments are open to anonymous visitors and published without review.
    /// The admin user gets a random session token.
    pub fn sample() -> Self {
        let mut welcome = Article::new(ArticleId(1), "Welcome to press");
        welcome.slug = Some("welcome".to_string());
        welcome.content =
            "<p>This is the first article. Leave a comment below to try the comment form.</p>"
                .to_string();
        welcome.meta_keywords = Some("press,welcome".to_string());

        let mut draft = Article::new(ArticleId(2), "Work in progress");
        draft.slug = Some("draft".to_string());
        draft.status = ArticleStatus::Draft;

        let mut moved = Article::new(ArticleId(3), "Moved elsewhere");
        moved.slug = Some("moved".to_string());
        moved.link_to = Some("https://www.rust-lang.org/".to_string());

        let mut options = BTreeMap::new();
        options.insert(OptionKey::CommentEnable.as_str().to_string(), "true".to_string());
        options.insert(
            OptionKey::CommentAnonymousEnable.as_str().to_string(),
            "true".to_string(),
        );
        options.insert(
            OptionKey::CommentReviewEnable.as_str().to_string(),
            "false".to_string(),
        );
        options.insert(
            OptionKey::CommentCaptchaEnable.as_str().to_string(),
            "false".to_string(),
        );

        let mut admin = User::new(UserId(1), "admin", "Administrator");
        admin.session_token = Some(Uuid::new_v4().simple().to_string());

        let mut home = Menu::new(1, "Home", "/");
        home.order_number = 0;
        let mut news = Menu::for_category(2, "News", "/category/news", 1);
        news.order_number = 1;

        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            articles: vec![welcome, draft, moved],
            categories: vec![ArticleCategory {
                id: CategoryId(1),
                title: "News".to_string(),
                slug: Some("news".to_string()),
                active: true,
            }],
            category_links: vec![CategoryLink {
                article_id: ArticleId(1),
                category_id: CategoryId(1),
            }],
            comments: Vec::new(),
            options,
            users: vec![admin],
            menus: vec![home, news],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_current() {
        let snapshot = SiteSnapshot::default();
        assert_eq!(snapshot.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(snapshot.check_version().is_ok());
    }

    #[test]
    fn test_minor_version_is_compatible() {
        let snapshot = SiteSnapshot {
            schema_version: "1.3".to_string(),
            ..Default::default()
        };
        assert!(snapshot.check_version().is_ok());
    }

    #[test]
    fn test_major_version_is_rejected() {
        let snapshot = SiteSnapshot {
            schema_version: "2.0".to_string(),
            ..Default::default()
        };
        assert!(matches!(snapshot.check_version(), Err(PressError::Validation(_))));
    }

    #[test]
    fn test_sample_site() {
        let sample = SiteSnapshot::sample();
        assert_eq!(sample.articles.len(), 3);
        assert_eq!(sample.options.get("article_comment_enable").map(String::as_str), Some("true"));
        assert!(sample.users[0].session_token.is_some());
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let snapshot: SiteSnapshot =
            serde_json::from_str(r#"{ "schema_version": "1.0" }"#).unwrap();
        assert!(snapshot.articles.is_empty());
        assert!(snapshot.options.is_empty());
    }
}
