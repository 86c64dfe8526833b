//! Site users as seen by the comment workflow
//!
//! Users are owned by an external auth subsystem. This module only reads the
//! current session's user and projects it for responses.

use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Active account
    #[default]
    Ok,
    /// Locked by an administrator
    Locked,
}

/// A registered user, including credential fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub nickname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    /// Password digest; never leaves the process
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub salt: Option<String>,
    /// Opaque session token issued by the auth subsystem
    #[serde(default)]
    pub session_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user with no credentials
    pub fn new(id: UserId, username: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            nickname: nickname.into(),
            email: None,
            status: UserStatus::Ok,
            password_hash: None,
            salt: None,
            session_token: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the account may act on the site
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Ok
    }

    /// Projection safe to send to clients
    pub fn safe(&self) -> SafeUser {
        SafeUser {
            id: self.id,
            username: self.username.clone(),
            nickname: self.nickname.clone(),
            email: self.email.clone(),
        }
    }
}

/// User fields that may appear in a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeUser {
    pub id: UserId,
    pub username: String,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
