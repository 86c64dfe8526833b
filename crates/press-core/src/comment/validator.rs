//! Comment content validation

use super::policy::CommentRejection;

/// Validator for submitted comment content
///
/// By default only blank content is refused. A length cap is opt-in.
#[derive(Debug, Clone, Default)]
pub struct CommentValidator {
    max_length: Option<usize>,
}

impl CommentValidator {
    /// Create a validator without a length cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator refusing content longer than `max_length`
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
        }
    }

    /// Check raw content and return it escaped for HTML
    ///
    /// Length is measured in characters of the raw input. The returned text
    /// is escaped exactly once and must not be escaped again.
    pub fn validate_content(&self, content: Option<&str>) -> Result<String, CommentRejection> {
        let content = content.unwrap_or_default();

        if content.trim().is_empty() {
            return Err(CommentRejection::EmptyContent);
        }

        if let Some(max) = self.max_length {
            if content.chars().count() > max {
                return Err(CommentRejection::ContentTooLong { max });
            }
        }

        Ok(escape_html(content))
    }
}

/// Escape text for safe inclusion in HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content_valid() {
        let validator = CommentValidator::new();
        assert_eq!(validator.validate_content(Some("hello")), Ok("hello".to_string()));
    }

    #[test]
    fn test_validate_content_empty() {
        let validator = CommentValidator::new();
        assert_eq!(validator.validate_content(None), Err(CommentRejection::EmptyContent));
        assert_eq!(validator.validate_content(Some("")), Err(CommentRejection::EmptyContent));
        assert_eq!(
            validator.validate_content(Some(" \n\t ")),
            Err(CommentRejection::EmptyContent)
        );
    }

    #[test]
    fn test_no_cap_by_default() {
        let validator = CommentValidator::new();
        let long = "a".repeat(5001);
        assert_eq!(validator.validate_content(Some(&long)), Ok(long.clone()));
    }

    #[test]
    fn test_validate_content_too_long() {
        let validator = CommentValidator::with_max_length(5);
        assert!(validator.validate_content(Some("short")).is_ok());
        assert_eq!(
            validator.validate_content(Some("too long")),
            Err(CommentRejection::ContentTooLong { max: 5 })
        );
    }

    #[test]
    fn test_length_counts_raw_characters() {
        // escaping expands "<" to four bytes, which must not count
        let validator = CommentValidator::with_max_length(3);
        assert_eq!(validator.validate_content(Some("<<<")), Ok("&lt;&lt;&lt;".to_string()));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert(\"x\" & 'y')</script>"),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }
}
