//! press - article pages and comment intake
//!
//! ## Quick Start
//!
//! ```bash
//! # Create press.toml and a sample site
//! press init
//!
//! # Serve it
//! press serve
//!
//! # Open comments to anonymous visitors
//! press option set article_comment_unlogin_enable true
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
