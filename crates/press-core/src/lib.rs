//! press-core - Core library for press
//!
//! This crate provides the business logic behind article pages and comment
//! intake: article lookup, the visibility gate, the comment policy engine,
//! and the collaborator traits the controller delegates to.

pub mod error;
pub mod types;
pub mod config;
pub mod options;
pub mod user;
pub mod article;
pub mod comment;
pub mod captcha;
pub mod notify;
pub mod store;
pub mod controller;

pub use error::{PressError, Result};
pub use types::*;
