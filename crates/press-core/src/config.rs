//! Configuration management for press

use crate::error::{PressError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Storage settings
    pub storage: StorageConfig,
    /// Comment intake settings
    pub comment: CommentConfig,
    /// SEO settings
    pub seo: SeoConfig,
    /// Captcha settings
    pub captcha: CaptchaConfig,
    /// Admin notification settings
    pub notify: NotifyConfig,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PressError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to load {}", path.display())))
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PressError::Toml(e.to_string()))
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.comment.max_length == Some(0) {
            return Err(PressError::Config(
                "comment.max_length must be greater than zero".to_string(),
            ));
        }
        if self.seo.description_length == 0 {
            return Err(PressError::Config(
                "seo.description_length must be greater than zero".to_string(),
            ));
        }
        if self.notify.enabled && self.notify.admin_emails.is_empty() {
            return Err(PressError::Config(
                "notify.enabled requires at least one admin address".to_string(),
            ));
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Site name used in page titles
    pub site_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            site_name: "press".to_string(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; the platform data dir is used when unset
    pub data_dir: Option<PathBuf>,
}

/// Comment intake configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// Optional cap on comment length in characters, before escaping.
    /// Unset means any length is accepted.
    pub max_length: Option<usize>,
}

/// SEO configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    /// Characters of body text used when an article has no description
    pub description_length: usize,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            description_length: 100,
        }
    }
}

/// Captcha configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptchaConfig {
    /// Seconds an issued challenge stays valid
    pub ttl_secs: u64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

/// Admin notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Write alert messages to the outbox
    pub enabled: bool,
    /// Recipients of new-comment alerts
    pub admin_emails: Vec<String>,
    /// Outbox directory, relative to the data dir unless absolute
    pub outbox_dir: PathBuf,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            admin_emails: Vec::new(),
            outbox_dir: PathBuf::from("outbox"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.seo.description_length, 100);
        assert!(!config.notify.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml_string().unwrap();
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[seo]"));

        let config2 = Config::from_toml_str(&toml).unwrap();
        assert_eq!(config.server.port, config2.server.port);
        assert_eq!(config.captcha.ttl_secs, config2.captcha.ttl_secs);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.comment.max_length, None);
    }

    #[test]
    fn test_comment_length_cap_is_opt_in() {
        let config = Config::from_toml_str("[comment]\nmax_length = 200\n").unwrap();
        assert_eq!(config.comment.max_length, Some(200));

        let result = Config::from_toml_str("[comment]\nmax_length = 0\n");
        assert!(matches!(result, Err(PressError::Config(_))));
    }

    #[test]
    fn test_notify_requires_admins() {
        let result = Config::from_toml_str("[notify]\nenabled = true\n");
        assert!(matches!(result, Err(PressError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/press.toml"));
        assert!(matches!(result, Err(PressError::FileNotFound(_))));
    }

    #[test]
    fn test_bind_address() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
