//! Shared request state

use press_core::captcha::CaptchaIssuer;
use press_core::config::Config;
use press_core::controller::{ArticleController, Services};
use std::sync::Arc;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ArticleController>,
    /// Issues challenges checked by the controller's captcha validator
    pub captcha: Arc<CaptchaIssuer>,
}

impl AppState {
    /// Build the state; `captcha` should be the same issuer wired into `services`
    pub fn new(services: Services, captcha: Arc<CaptchaIssuer>, config: &Config) -> Self {
        Self {
            controller: Arc::new(ArticleController::new(services, config)),
            captcha,
        }
    }
}
