//! Response returned to comment submitters

use super::model::{Comment, CommentView};
use super::policy::CommentRejection;
use crate::user::{SafeUser, User};
use serde::{Deserialize, Serialize};

/// JSON body answering a comment submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Present only for comments visible immediately
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SafeUser>,
}

impl CommentResponse {
    /// Success answer for a stored comment
    pub fn accepted(comment: &Comment, user: Option<&User>) -> Self {
        Self {
            success: true,
            code: Some(0),
            message: None,
            comment: comment.is_normal().then(|| comment.view()),
            user: user.map(User::safe),
        }
    }

    /// Failure answer for a refused submission
    pub fn rejected(reason: &CommentRejection) -> Self {
        Self {
            success: false,
            code: reason.code(),
            message: reason.message(),
            comment: None,
            user: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{CommentBuilder, CommentStatus};
    use crate::types::{ArticleId, UserId};

    fn comment(status: CommentStatus) -> Comment {
        CommentBuilder::new(ArticleId(5))
            .content("hello")
            .status(status)
            .build()
            .unwrap()
    }

    #[test]
    fn test_visible_comment_is_echoed() {
        let response = CommentResponse::accepted(&comment(CommentStatus::Normal), None);
        assert!(response.success);
        assert_eq!(response.code, Some(0));
        assert_eq!(response.comment.unwrap().content, "hello");
        assert!(response.user.is_none());
    }

    #[test]
    fn test_pending_comment_is_omitted() {
        let response = CommentResponse::accepted(&comment(CommentStatus::Unaudited), None);
        assert!(response.success);
        assert_eq!(response.code, Some(0));
        assert!(response.comment.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("comment").is_none());
    }

    #[test]
    fn test_user_is_projected() {
        let mut user = User::new(UserId(1), "alice", "Alice");
        user.password_hash = Some("digest".to_string());
        let response = CommentResponse::accepted(&comment(CommentStatus::Normal), Some(&user));

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"nickname\":\"Alice\""));
        assert!(!json.contains("digest"));
    }

    #[test]
    fn test_rejection_shape() {
        let response = CommentResponse::rejected(&CommentRejection::LoginRequired);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 9);
        assert_eq!(json["message"], "unauthenticated users may not comment");

        let generic = serde_json::to_value(CommentResponse::rejected(
            &CommentRejection::InvalidArticle,
        ))
        .unwrap();
        assert_eq!(generic, serde_json::json!({ "success": false }));
    }
}
