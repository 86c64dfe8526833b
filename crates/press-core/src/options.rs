//! Site option flags
//!
//! Options live in an external key-value store. Every flag read here treats
//! an absent key as disabled.

use crate::error::Result;
use crate::store::OptionStore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean options consulted by comment intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    /// Require a captcha on comment submission
    CommentCaptchaEnable,
    /// Accept comments at all
    CommentEnable,
    /// Accept comments from visitors without a session
    CommentAnonymousEnable,
    /// Hold new comments for moderation
    CommentReviewEnable,
}

impl OptionKey {
    /// All known keys
    pub const ALL: [OptionKey; 4] = [
        OptionKey::CommentCaptchaEnable,
        OptionKey::CommentEnable,
        OptionKey::CommentAnonymousEnable,
        OptionKey::CommentReviewEnable,
    ];

    /// Key name in the option store
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::CommentCaptchaEnable => "article_comment_vcode_enable",
            OptionKey::CommentEnable => "article_comment_enable",
            OptionKey::CommentAnonymousEnable => "article_comment_unlogin_enable",
            OptionKey::CommentReviewEnable => "article_comment_review_enable",
        }
    }

    /// Look a key up by its store name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a stored option value as a boolean
///
/// Anything other than `true`/`1`/`on` (case-insensitive) is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on"
    )
}

/// Read a flag, treating an absent value as disabled
pub fn is_enabled(store: &dyn OptionStore, key: OptionKey) -> Result<bool> {
    Ok(store.get_bool(key.as_str())?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapOptions(HashMap<String, String>);

    impl OptionStore for MapOptions {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.get(key).cloned())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_key_names() {
        assert_eq!(OptionKey::CommentEnable.as_str(), "article_comment_enable");
        assert_eq!(
            OptionKey::from_name("article_comment_review_enable"),
            Some(OptionKey::CommentReviewEnable)
        );
        assert_eq!(OptionKey::from_name("site_title"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool(" TRUE "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
        assert!(!parse_bool("yes please"));
    }

    #[test]
    fn test_absent_is_disabled() {
        let store = MapOptions(HashMap::new());
        for key in OptionKey::ALL {
            assert!(!is_enabled(&store, key).unwrap());
        }
    }

    #[test]
    fn test_present_flag() {
        let mut map = HashMap::new();
        map.insert("article_comment_enable".to_string(), "true".to_string());
        let store = MapOptions(map);
        assert!(is_enabled(&store, OptionKey::CommentEnable).unwrap());
        assert!(!is_enabled(&store, OptionKey::CommentReviewEnable).unwrap());
    }
}
