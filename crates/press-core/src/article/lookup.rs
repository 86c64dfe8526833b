//! Article lookup from route segments

use super::model::Article;
use crate::error::Result;
use crate::store::ContentStore;
use crate::types::ArticleId;
use std::sync::Arc;
use tracing::debug;

/// What a route segment identifies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKey {
    /// Fully numeric segment
    Id(ArticleId),
    /// Anything else, already URL-decoded
    Slug(String),
}

impl RouteKey {
    /// Classify a raw (still percent-encoded) route segment
    ///
    /// Returns `None` when the segment cannot name any article: a numeric
    /// segment that overflows the id type, or a slug that does not decode.
    pub fn parse(segment: &str) -> Option<Self> {
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            return segment.parse::<u64>().ok().map(|id| RouteKey::Id(ArticleId(id)));
        }

        match urlencoding::decode(segment) {
            Ok(slug) => Some(RouteKey::Slug(slug.into_owned())),
            Err(e) => {
                debug!("Undecodable slug segment {:?}: {}", segment, e);
                None
            }
        }
    }
}

/// Resolves articles by id or slug
pub struct ArticleLookup {
    store: Arc<dyn ContentStore>,
}

impl ArticleLookup {
    /// Create a lookup over the given content store
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Resolve a raw route segment to an article
    pub fn resolve(&self, segment: &str) -> Result<Option<Article>> {
        match RouteKey::parse(segment) {
            Some(key) => self.fetch(&key),
            None => Ok(None),
        }
    }

    /// Fetch by an already classified key
    pub fn fetch(&self, key: &RouteKey) -> Result<Option<Article>> {
        match key {
            RouteKey::Id(id) => self.store.find_by_id(*id),
            RouteKey::Slug(slug) => self.store.find_first_by_slug(slug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{Call, MemorySite};

    fn article(id: u64, slug: &str) -> Article {
        let mut article = Article::new(ArticleId(id), format!("Article {}", id));
        article.slug = Some(slug.to_string());
        article
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(RouteKey::parse("42"), Some(RouteKey::Id(ArticleId(42))));
    }

    #[test]
    fn test_parse_slug_is_decoded() {
        assert_eq!(
            RouteKey::parse("hello%20world"),
            Some(RouteKey::Slug("hello world".to_string()))
        );
        assert_eq!(
            RouteKey::parse("%E4%BD%A0%E5%A5%BD"),
            Some(RouteKey::Slug("你好".to_string()))
        );
    }

    #[test]
    fn test_parse_mixed_is_slug() {
        assert_eq!(RouteKey::parse("42abc"), Some(RouteKey::Slug("42abc".to_string())));
        assert_eq!(RouteKey::parse("-5"), Some(RouteKey::Slug("-5".to_string())));
    }

    #[test]
    fn test_parse_overflow_is_none() {
        assert_eq!(RouteKey::parse("99999999999999999999999"), None);
    }

    #[test]
    fn test_parse_invalid_utf8_is_none() {
        assert_eq!(RouteKey::parse("%FF%FE"), None);
    }

    #[test]
    fn test_numeric_queries_id_only() {
        let site = Arc::new(MemorySite::new().with_article(article(7, "seven")));
        let lookup = ArticleLookup::new(site.clone());

        let found = lookup.resolve("7").unwrap().unwrap();
        assert_eq!(found.id, ArticleId(7));
        assert_eq!(site.calls(), vec![Call::FindById(ArticleId(7))]);
    }

    #[test]
    fn test_slug_queries_slug_only() {
        let site = Arc::new(MemorySite::new().with_article(article(7, "rust tips")));
        let lookup = ArticleLookup::new(site.clone());

        let found = lookup.resolve("rust%20tips").unwrap().unwrap();
        assert_eq!(found.id, ArticleId(7));
        assert_eq!(site.calls(), vec![Call::FindBySlug("rust tips".to_string())]);
    }

    #[test]
    fn test_duplicate_slug_takes_first() {
        let site = Arc::new(
            MemorySite::new()
                .with_article(article(3, "dup"))
                .with_article(article(4, "dup")),
        );
        let lookup = ArticleLookup::new(site);

        let found = lookup.resolve("dup").unwrap().unwrap();
        assert_eq!(found.id, ArticleId(3));
    }

    #[test]
    fn test_missing_article() {
        let site = Arc::new(MemorySite::new());
        let lookup = ArticleLookup::new(site);
        assert!(lookup.resolve("1").unwrap().is_none());
        assert!(lookup.resolve("nothing-here").unwrap().is_none());
    }
}
