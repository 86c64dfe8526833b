//! Navigation menu highlighting

use super::model::{Article, ArticleCategory};
use serde::{Deserialize, Serialize};

/// `relative_table` value of menu entries that point at a category
pub const ARTICLE_CATEGORY_TABLE: &str = "article_category";

/// A navigation menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: u64,
    pub text: String,
    pub url: String,
    /// Table of the entity this entry represents
    #[serde(default)]
    pub relative_table: Option<String>,
    /// Id of the entity this entry represents
    #[serde(default)]
    pub relative_id: Option<u64>,
    #[serde(default)]
    pub order_number: i32,
    /// Set while rendering; never persisted as true
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub active: bool,
}

impl Menu {
    /// Create a plain link entry
    pub fn new(id: u64, text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            url: url.into(),
            relative_table: None,
            relative_id: None,
            order_number: 0,
            active: false,
        }
    }

    /// Create an entry representing a category
    pub fn for_category(id: u64, text: impl Into<String>, url: impl Into<String>, category: u64) -> Self {
        Self {
            relative_table: Some(ARTICLE_CATEGORY_TABLE.to_string()),
            relative_id: Some(category),
            ..Self::new(id, text, url)
        }
    }
}

/// Marks menu entries active for a page
pub struct MenuHighlighter {
    menus: Vec<Menu>,
}

impl MenuHighlighter {
    /// Start from the site's menu list, sorted by display order
    pub fn new(mut menus: Vec<Menu>) -> Self {
        menus.sort_by_key(|m| m.order_number);
        Self { menus }
    }

    /// Mark every entry matching the predicate as active
    pub fn mark_active(&mut self, predicate: impl Fn(&Menu) -> bool) -> &mut Self {
        for menu in self.menus.iter_mut().filter(|m| predicate(m)) {
            menu.active = true;
        }
        self
    }

    /// Highlight entries for an article page
    ///
    /// An entry is active when its URL starts with the article URL, or when
    /// it represents one of the article's categories.
    pub fn for_article(&mut self, article: &Article, categories: &[ArticleCategory]) -> &mut Self {
        let article_url = article.url();
        self.mark_active(|menu| menu.url.starts_with(&article_url));

        if categories.is_empty() {
            return self;
        }

        self.mark_active(|menu| {
            menu.relative_table.as_deref() == Some(ARTICLE_CATEGORY_TABLE)
                && categories
                    .iter()
                    .any(|c| Some(c.id.0) == menu.relative_id)
        })
    }

    /// Finished menu list
    pub fn into_menus(self) -> Vec<Menu> {
        self.menus
    }
}
