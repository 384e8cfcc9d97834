use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use review_watchbot::config::{self, Credentials};
use review_watchbot::model::NotifyPolicy;
use review_watchbot::notifier::{Notifier, TelegramSink};
use review_watchbot::poller::{self, PollLoop};
use review_watchbot::practicum::PracticumClient;
use review_watchbot::tracker::StatusTracker;

/// Exit status when required credentials are absent.
const EXIT_MISSING_CREDENTIALS: i32 = 2;

#[derive(Debug, Parser)]
#[command(author, version, about = "Relay homework review status changes to Telegram")]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the notification policy from the config file
    #[arg(long, value_enum)]
    policy: Option<NotifyPolicy>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    review_watchbot::init_tracing();

    let args = Args::parse();
    let credentials = Credentials::from_env();
    if poller::check_credentials(&credentials).is_err() {
        std::process::exit(EXIT_MISSING_CREDENTIALS);
    }

    let mut cfg = config::load(Some(&args.config))
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(policy) = args.policy {
        cfg.app.policy = policy;
    }

    let api = PracticumClient::new(
        credentials.practicum_token.clone(),
        cfg.endpoint_url()?,
        cfg.request_timeout(),
    )?;
    let sink = TelegramSink::from_token(&credentials.telegram_token, &credentials.telegram_chat_id);
    let poll_loop = PollLoop::new(
        Arc::new(api),
        Notifier::new(Arc::new(sink)),
        StatusTracker::new(cfg.app.policy),
        cfg.retry_interval(),
    );

    match poller::watch(&credentials, poll_loop).await {
        Ok(never) => match never {},
        Err(_) => std::process::exit(EXIT_MISSING_CREDENTIALS),
    }
}
