//! Page metadata for search engines

use super::model::Article;
use serde::{Deserialize, Serialize};

/// SEO fields of a rendered page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMeta {
    pub title: String,
    pub keywords: Option<String>,
    pub description: Option<String>,
}

impl SeoMeta {
    /// Build metadata for an article
    ///
    /// A blank description falls back to the first `description_length`
    /// characters of the body text.
    pub fn for_article(article: &Article, description_length: usize) -> Self {
        let description = match article
            .meta_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
        {
            Some(d) => Some(d.to_string()),
            None => {
                let text = article.text();
                (!text.is_empty()).then(|| max_length(&text, description_length))
            }
        };

        Self {
            title: article.title.clone(),
            keywords: article
                .meta_keywords
                .clone()
                .filter(|k| !k.trim().is_empty()),
            description,
        }
    }
}

/// Truncate to at most `max` characters
fn max_length(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArticleId;

    #[test]
    fn test_explicit_description_wins() {
        let mut article = Article::new(ArticleId(1), "Title");
        article.meta_description = Some("Hand written".to_string());
        article.content = "<p>Body</p>".to_string();

        let seo = SeoMeta::for_article(&article, 100);
        assert_eq!(seo.title, "Title");
        assert_eq!(seo.description.as_deref(), Some("Hand written"));
    }

    #[test]
    fn test_description_falls_back_to_text() {
        let mut article = Article::new(ArticleId(1), "Title");
        article.meta_description = Some("  ".to_string());
        article.content = format!("<p>{}</p>", "a".repeat(250));

        let seo = SeoMeta::for_article(&article, 100);
        assert_eq!(seo.description.as_deref().map(str::len), Some(100));
    }

    #[test]
    fn test_fallback_counts_characters() {
        let mut article = Article::new(ArticleId(1), "Title");
        article.content = "é".repeat(120);

        let seo = SeoMeta::for_article(&article, 100);
        assert_eq!(seo.description.unwrap().chars().count(), 100);
    }

    #[test]
    fn test_empty_body_has_no_description() {
        let article = Article::new(ArticleId(1), "Title");
        let seo = SeoMeta::for_article(&article, 100);
        assert!(seo.description.is_none());
        assert!(seo.keywords.is_none());
    }
}
