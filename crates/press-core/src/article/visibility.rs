//! Visibility gate for article pages

use super::menu::{Menu, MenuHighlighter};
use super::model::Article;
use super::seo::SeoMeta;
use crate::comment::{CommentStatus, CommentView};
use crate::error::Result;
use crate::store::{CategoryStore, CommentStore, ContentStore, MenuStore, ViewRenderer};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// How a resolved article is answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Not shown to readers (404)
    Hidden,
    /// Redirect to an external target
    Redirect(String),
    /// Render the page
    Show,
}

impl Visibility {
    /// Apply the visibility rules, first match wins
    pub fn of(article: &Article) -> Self {
        if !article.is_normal() {
            return Visibility::Hidden;
        }
        if let Some(target) = article.redirect_target() {
            return Visibility::Redirect(target.to_string());
        }
        Visibility::Show
    }
}

/// Attributes handed to the view renderer
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage {
    pub article: Article,
    pub seo: SeoMeta,
    pub menus: Vec<Menu>,
    /// Publicly visible comments, oldest first
    pub comments: Vec<CommentView>,
}

/// Outcome of an article page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleResponse {
    NotFound,
    Redirect(String),
    Page { view: String, body: String },
}

/// Decides whether a resolved article is shown and renders it
pub struct VisibilityGate {
    content: Arc<dyn ContentStore>,
    categories: Arc<dyn CategoryStore>,
    comments: Arc<dyn CommentStore>,
    menus: Arc<dyn MenuStore>,
    renderer: Arc<dyn ViewRenderer>,
    description_length: usize,
}

impl VisibilityGate {
    /// Create a gate over the given collaborators
    pub fn new(
        content: Arc<dyn ContentStore>,
        categories: Arc<dyn CategoryStore>,
        comments: Arc<dyn CommentStore>,
        menus: Arc<dyn MenuStore>,
        renderer: Arc<dyn ViewRenderer>,
        description_length: usize,
    ) -> Self {
        Self {
            content,
            categories,
            comments,
            menus,
            renderer,
            description_length,
        }
    }

    /// Answer a request for an already resolved article
    ///
    /// The view counter is incremented only when the page is rendered.
    pub fn show(&self, article: Article) -> Result<ArticleResponse> {
        match Visibility::of(&article) {
            Visibility::Hidden => {
                debug!("Article {} is {}, answering 404", article.id, article.status);
                Ok(ArticleResponse::NotFound)
            }
            Visibility::Redirect(target) => {
                debug!("Article {} redirects to {}", article.id, target);
                Ok(ArticleResponse::Redirect(target))
            }
            Visibility::Show => self.render(article),
        }
    }

    fn render(&self, article: Article) -> Result<ArticleResponse> {
        let seo = SeoMeta::for_article(&article, self.description_length);

        let categories = self.categories.find_active_by_article(article.id)?;
        let mut highlighter = MenuHighlighter::new(self.menus.list_menus()?);
        highlighter.for_article(&article, &categories);

        let comments = self
            .comments
            .list_by_article(article.id)?
            .iter()
            .filter(|c| c.status == CommentStatus::Normal)
            .map(|c| c.view())
            .collect();

        let view = article.html_view();
        let page = ArticlePage {
            article,
            seo,
            menus: highlighter.into_menus(),
            comments,
        };
        let body = self.renderer.render(&view, &page)?;

        self.content.inc_view_count(page.article.id)?;

        Ok(ArticleResponse::Page { view, body })
    }
}
