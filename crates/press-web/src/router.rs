//! HTTP routes

use crate::error::WebError;
use crate::session::session_token;
use crate::state::AppState;
use anyhow::Context;
use axum::extract::{Form, RawPathParams, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use press_core::article::ArticleResponse;
use press_core::captcha::{CaptchaChallenge, CaptchaToken};
use press_core::comment::{CommentResponse, CommentSubmission};
use press_core::config::Config;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Build the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/captcha", get(issue_captcha))
        .route("/article/postComment", post(post_comment))
        .route("/article/{key}", get(article_page))
        .with_state(state)
}

/// Bind the configured address and serve until shutdown
pub async fn serve(config: &Config, state: AppState) -> anyhow::Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, create_router(state))
        .await
        .context("Server error")?;
    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn issue_captcha(State(state): State<AppState>) -> Json<CaptchaChallenge> {
    Json(state.captcha.issue())
}

/// `GET /article/{id-or-slug}`
///
/// The segment is taken undecoded; lookup decides whether to decode it.
/// Redirects answer 302 Found.
async fn article_page(
    State(state): State<AppState>,
    params: RawPathParams,
) -> Result<Response, WebError> {
    let segment = params
        .iter()
        .next()
        .map(|(_, value)| value)
        .unwrap_or_default();
    let segment = segment.strip_suffix(".html").unwrap_or(segment).to_string();
    debug!("Article request for {:?}", segment);

    let controller = state.controller.clone();
    let response = tokio::task::spawn_blocking(move || controller.view_article(&segment)).await??;

    Ok(match response {
        ArticleResponse::NotFound => {
            (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>")).into_response()
        }
        ArticleResponse::Redirect(target) => {
            (StatusCode::FOUND, [(LOCATION, target)]).into_response()
        }
        ArticleResponse::Page { body, .. } => Html(body).into_response(),
    })
}

/// Comment form as posted by the article page
///
/// Numeric fields arrive as text so that blank or malformed values reach
/// the policy instead of failing form extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    pub article_id: Option<String>,
    pub pid: Option<String>,
    pub nickname: Option<String>,
    pub content: Option<String>,
    pub email: Option<String>,
    pub wechat: Option<String>,
    pub qq: Option<String>,
    /// Captcha answer
    pub captcha: Option<String>,
    pub captcha_ticket: Option<String>,
}

impl CommentForm {
    fn into_submission(self) -> CommentSubmission {
        let captcha = match (self.captcha_ticket, self.captcha) {
            (Some(ticket), Some(answer)) => Some(CaptchaToken::new(ticket, answer)),
            _ => None,
        };
        CommentSubmission {
            article_id: parse_long(self.article_id.as_deref()),
            pid: parse_long(self.pid.as_deref()),
            nickname: self.nickname,
            content: self.content,
            email: self.email,
            wechat: self.wechat,
            qq: self.qq,
            captcha,
        }
    }
}

fn parse_long(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

/// `POST /article/postComment`
///
/// The admin alert runs on a detached task after the response is built.
async fn post_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CommentForm>,
) -> Result<Json<CommentResponse>, WebError> {
    let token = session_token(&headers);
    let submission = form.into_submission();

    let controller = state.controller.clone();
    let outcome =
        tokio::task::spawn_blocking(move || controller.post_comment(submission, token.as_deref()))
            .await??;

    if let Some(notification) = outcome.notification {
        let notifier = state.controller.notifier();
        tokio::task::spawn_blocking(move || notification.dispatch(notifier.as_ref()));
    }

    Ok(Json(outcome.response))
}
