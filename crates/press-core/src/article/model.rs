//! Article data models

use crate::types::{ArticleId, CategoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default view template for articles
pub const DEFAULT_VIEW: &str = "article.html";

/// A published (or not yet published) article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique article identifier
    pub id: ArticleId,
    /// URL-safe alternative identifier
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    /// Body as HTML
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: ArticleStatus,
    /// External URL the article redirects to instead of rendering
    #[serde(default)]
    pub link_to: Option<String>,
    /// Template variant; selects `article_{style}.html`
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default = "default_true")]
    pub comment_enable: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Article {
    /// Create a normal, comment-enabled article
    pub fn new(id: ArticleId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            slug: None,
            title: title.into(),
            content: String::new(),
            status: ArticleStatus::Normal,
            link_to: None,
            style: None,
            meta_keywords: None,
            meta_description: None,
            comment_enable: true,
            view_count: 0,
            comment_count: 0,
            created_at: now,
            modified_at: now,
        }
    }

    /// Visible to ordinary readers
    pub fn is_normal(&self) -> bool {
        self.status == ArticleStatus::Normal
    }

    /// Non-blank redirect target, if any
    pub fn redirect_target(&self) -> Option<&str> {
        self.link_to
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Public URL path of the article
    pub fn url(&self) -> String {
        match self.slug.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(slug) => format!("/article/{}", urlencoding::encode(slug)),
            None => format!("/article/{}", self.id),
        }
    }

    /// Template this article renders with
    pub fn html_view(&self) -> String {
        match self.style.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(style) => format!("article_{}.html", style),
            None => DEFAULT_VIEW.to_string(),
        }
    }

    /// Body text with markup removed and whitespace collapsed
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.content.len());
        let mut in_tag = false;
        for c in self.content.chars() {
            match c {
                '<' => {
                    in_tag = true;
                    out.push(' ');
                }
                '>' if in_tag => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Publication state of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Published and visible
    #[default]
    Normal,
    /// Awaiting editorial review
    Pending,
    /// Unpublished draft
    Draft,
    /// Moved to trash
    Trash,
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArticleStatus::Normal => write!(f, "normal"),
            ArticleStatus::Pending => write!(f, "pending"),
            ArticleStatus::Draft => write!(f, "draft"),
            ArticleStatus::Trash => write!(f, "trash"),
        }
    }
}

/// Category an article may belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleCategory {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// Inactive categories are ignored for navigation
    #[serde(default = "default_true")]
    pub active: bool,
}
