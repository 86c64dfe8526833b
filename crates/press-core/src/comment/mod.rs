//! Comment module
//!
//! Comment intake: validation, the policy guard chain, construction and the
//! response shape returned to clients.

pub mod model;
pub mod validator;
pub mod builder;
pub mod policy;
pub mod response;

pub use model::*;
pub use validator::{escape_html, CommentValidator};
pub use builder::CommentBuilder;
pub use policy::{CommentPolicy, CommentRejection, CommentSubmission, Verdict, LOGIN_REQUIRED_CODE};
pub use response::CommentResponse;
