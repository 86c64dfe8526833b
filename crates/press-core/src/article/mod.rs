//! Article module
//!
//! Resolves articles from route segments and decides how they are shown.

pub mod model;
pub mod lookup;
pub mod visibility;
pub mod seo;
pub mod menu;

pub use model::*;
pub use lookup::{ArticleLookup, RouteKey};
pub use visibility::{ArticlePage, ArticleResponse, Visibility, VisibilityGate};
pub use seo::SeoMeta;
pub use menu::{Menu, MenuHighlighter, ARTICLE_CATEGORY_TABLE};
