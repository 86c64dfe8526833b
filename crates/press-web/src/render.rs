//! Built-in HTML renderer

use press_core::article::{ArticlePage, Menu};
use press_core::comment::{escape_html, CommentView};
use press_core::error::Result;
use press_core::store::ViewRenderer;

/// Renders article pages as self-contained HTML
///
/// Every view name maps to the same layout; the view name is exposed as a
/// `data-view` attribute so themes can style per-template. Article bodies are
/// trusted HTML. Comment bodies were escaped on intake and are emitted as is.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    site_name: String,
}

impl HtmlRenderer {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }

    fn nav(&self, menus: &[Menu]) -> String {
        let mut out = String::from("<nav><ul>");
        for menu in menus {
            let class = if menu.active { " class=\"active\"" } else { "" };
            out.push_str(&format!(
                "<li{}><a href=\"{}\">{}</a></li>",
                class,
                escape_html(&menu.url),
                escape_html(&menu.text)
            ));
        }
        out.push_str("</ul></nav>");
        out
    }

    fn comments(&self, page: &ArticlePage) -> String {
        let mut out = String::from("<section class=\"comments\">");
        out.push_str(&format!("<h2>Comments ({})</h2>", page.comments.len()));
        for comment in &page.comments {
            out.push_str(&comment_item(comment));
        }
        if page.article.comment_enable {
            out.push_str(&format!(
                concat!(
                    "<form method=\"post\" action=\"/article/postComment\">",
                    "<input type=\"hidden\" name=\"articleId\" value=\"{}\">",
                    "<input name=\"nickname\" placeholder=\"Name\">",
                    "<textarea name=\"content\"></textarea>",
                    "<button type=\"submit\">Post</button>",
                    "</form>"
                ),
                page.article.id
            ));
        }
        out.push_str("</section>");
        out
    }
}

fn comment_item(comment: &CommentView) -> String {
    let author = comment
        .author
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "anonymous".to_string());
    let id = comment.id.map(|id| id.to_string()).unwrap_or_default();
    format!(
        "<article class=\"comment\" id=\"comment-{}\"><header>{} · {}</header><p>{}</p></article>",
        id,
        author,
        comment.created_at.format("%Y-%m-%d %H:%M"),
        comment.content
    )
}

impl ViewRenderer for HtmlRenderer {
    fn render(&self, view: &str, page: &ArticlePage) -> Result<String> {
        let mut head = format!(
            "<title>{} - {}</title>",
            escape_html(&page.seo.title),
            escape_html(&self.site_name)
        );
        if let Some(keywords) = &page.seo.keywords {
            head.push_str(&format!(
                "<meta name=\"keywords\" content=\"{}\">",
                escape_html(keywords)
            ));
        }
        if let Some(description) = &page.seo.description {
            head.push_str(&format!(
                "<meta name=\"description\" content=\"{}\">",
                escape_html(description)
            ));
        }

        Ok(format!(
            concat!(
                "<!DOCTYPE html><html><head><meta charset=\"utf-8\">{}</head>",
                "<body data-view=\"{}\">{}<main><h1>{}</h1><div class=\"content\">{}</div>{}</main>",
                "</body></html>"
            ),
            head,
            escape_html(view),
            self.nav(&page.menus),
            escape_html(&page.article.title),
            page.article.content,
            self.comments(page)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_core::article::{Article, SeoMeta};
    use press_core::comment::{CommentBuilder, CommentStatus};
    use press_core::types::ArticleId;

    fn page() -> ArticlePage {
        let mut article = Article::new(ArticleId(1), "Fish & Chips");
        article.content = "<p>Body</p>".to_string();
        let comment = CommentBuilder::new(ArticleId(1))
            .content("&lt;b&gt;hi&lt;/b&gt;")
            .author(Some("<eve>".to_string()))
            .status(CommentStatus::Normal)
            .build()
            .unwrap();
        let mut home = Menu::new(1, "Home", "/");
        home.active = true;

        ArticlePage {
            seo: SeoMeta {
                title: article.title.clone(),
                keywords: Some("food".to_string()),
                description: Some("Body".to_string()),
            },
            article,
            menus: vec![home],
            comments: vec![comment.view()],
        }
    }

    #[test]
    fn test_render_page() {
        let html = HtmlRenderer::new("press")
            .render("article.html", &page())
            .unwrap();

        assert!(html.contains("<title>Fish &amp; Chips - press</title>"));
        assert!(html.contains("<meta name=\"keywords\" content=\"food\">"));
        assert!(html.contains("data-view=\"article.html\""));
        assert!(html.contains("<div class=\"content\"><p>Body</p></div>"));
        assert!(html.contains("<li class=\"active\"><a href=\"/\">Home</a></li>"));
        assert!(html.contains("Comments (1)"));
    }

    #[test]
    fn test_comment_content_not_escaped_twice() {
        let html = HtmlRenderer::new("press")
            .render("article.html", &page())
            .unwrap();

        assert!(html.contains("<p>&lt;b&gt;hi&lt;/b&gt;</p>"));
        assert!(html.contains("&lt;eve&gt;"));
        assert!(!html.contains("&amp;lt;"));
    }

    #[test]
    fn test_comment_form_only_when_open() {
        let mut closed = page();
        closed.article.comment_enable = false;
        let html = HtmlRenderer::new("press").render("article.html", &closed).unwrap();
        assert!(!html.contains("<form"));
    }
}
