//! Serve command
//!
//! Run the HTTP server over the site in the data directory.

use super::Settings;
use anyhow::{Context, Result};
use clap::Args;
use press_core::captcha::CaptchaIssuer;
use press_core::controller::Services;
use press_core::notify::LogNotifier;
use press_core::store::Notifier;
use press_storage::OutboxNotifier;
use press_web::{AppState, HtmlRenderer};
use std::sync::Arc;
use tracing::info;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long, short)]
    pub port: Option<u16>,
}

/// Execute the serve command
pub fn execute(args: ServeArgs, mut settings: Settings) -> Result<()> {
    use colored::Colorize;

    if let Some(host) = args.host {
        settings.config.server.host = host;
    }
    if let Some(port) = args.port {
        settings.config.server.port = port;
    }
    settings
        .config
        .validate()
        .context("Invalid configuration")?;

    let storage = Arc::new(settings.open_storage()?);
    let captcha = Arc::new(CaptchaIssuer::new(settings.config.captcha.ttl_secs));
    let notifier = build_notifier(&settings)?;

    let services = Services {
        content: storage.clone(),
        categories: storage.clone(),
        comments: storage.clone(),
        options: storage.clone(),
        menus: storage.clone(),
        sessions: storage.clone(),
        captcha: captcha.clone(),
        notifier,
        renderer: Arc::new(HtmlRenderer::new(settings.config.server.site_name.clone())),
    };
    let state = AppState::new(services, captcha, &settings.config);

    println!(
        "{} Serving {} on {}",
        "✓".green(),
        storage.base_dir().display(),
        format!("http://{}", settings.config.bind_address()).cyan()
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(press_web::serve(&settings.config, state))
}

fn build_notifier(settings: &Settings) -> Result<Arc<dyn Notifier>> {
    let notify = &settings.config.notify;
    if !notify.enabled {
        info!("Admin notifications disabled, logging new comments only");
        return Ok(Arc::new(LogNotifier));
    }

    let dir = settings.outbox_dir();
    let notifier = OutboxNotifier::new(&dir, notify.admin_emails.clone())
        .with_context(|| format!("Failed to prepare outbox {}", dir.display()))?;
    info!(
        "Admin notifications go to {:?} for {} recipient(s)",
        dir,
        notify.admin_emails.len()
    );
    Ok(Arc::new(notifier))
}
