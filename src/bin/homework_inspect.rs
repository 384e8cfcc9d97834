use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use review_watchbot::config::{self, Credentials, PRACTICUM_TOKEN_VAR};
use review_watchbot::model::ReviewStatus;
use review_watchbot::practicum::{check_response, HomeworkApi, PracticumClient};
use review_watchbot::status::verdict;

#[derive(Parser, Debug)]
#[command(about = "Fetch homework statuses once and print them")]
struct Args {
    /// Path to YAML config
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Lower bound of the query window, unix seconds (default: 30 days ago)
    #[arg(long)]
    from_date: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    review_watchbot::init_tracing();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;
    let credentials = Credentials::from_env();
    if credentials.practicum_token.is_empty() {
        bail!("{} must be set", PRACTICUM_TOKEN_VAR);
    }

    let client = PracticumClient::new(
        credentials.practicum_token,
        cfg.endpoint_url()?,
        cfg.request_timeout(),
    )?;
    let from_date = args
        .from_date
        .unwrap_or_else(|| (Utc::now() - Duration::days(30)).timestamp());

    let payload = client.fetch(from_date).await?;
    let homeworks = check_response(&payload)?;
    println!("Homeworks since {}: {}", from_date, homeworks.len());
    for hw in homeworks {
        let status = hw.raw_status();
        match ReviewStatus::parse(status) {
            Some(known) => println!("  {} -> {} ({})", hw.name(), status, verdict(known)),
            None => println!("  {} -> {} (unknown status)", hw.name(), status),
        }
    }
    Ok(())
}
