//! press-web - HTTP front end for press
//!
//! Serves article pages and accepts comment submissions on top of the
//! controller in `press-core`.

pub mod error;
pub mod render;
pub mod router;
pub mod session;
pub mod state;

pub use error::WebError;
pub use render::HtmlRenderer;
pub use router::{create_router, serve};
pub use state::AppState;
