//! The fetch/validate/describe/notify cycle and the loop around it.
use chrono::Utc;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::config::{ConfigError, Credentials};
use crate::error::WatchError;
use crate::notifier::Notifier;
use crate::practicum::{check_response, HomeworkApi};
use crate::status::failure_message;
use crate::tracker::StatusTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A message about the latest submission was handed to the notifier.
    Notified,
    /// The API returned no submissions; nothing was sent.
    NoSubmissions,
    /// The cycle failed and a failure message was handed to the notifier.
    Failed,
}

pub struct PollLoop {
    api: Arc<dyn HomeworkApi>,
    notifier: Notifier,
    tracker: StatusTracker,
    retry_interval: Duration,
    cursor: Option<i64>,
}

impl PollLoop {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Notifier,
        tracker: StatusTracker,
        retry_interval: Duration,
    ) -> Self {
        Self {
            api,
            notifier,
            tracker,
            retry_interval,
            cursor: None,
        }
    }

    /// Lower bound of the next query window, once a cycle has succeeded.
    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    /// Run one cycle with `now` as the request time. Errors never escape:
    /// they are turned into a failure message for the operator.
    #[instrument(skip(self))]
    pub async fn run_cycle(&mut self, now: i64) -> CycleOutcome {
        match self.poll(now).await {
            Ok(Some(message)) => {
                self.notifier.send(&message).await;
                CycleOutcome::Notified
            }
            Ok(None) => {
                info!("no submissions in window");
                CycleOutcome::NoSubmissions
            }
            Err(err) => {
                warn!(%err, "poll cycle failed");
                self.notifier.send(&failure_message(&err)).await;
                CycleOutcome::Failed
            }
        }
    }

    async fn poll(&mut self, now: i64) -> Result<Option<String>, WatchError> {
        let from_date = self.cursor.unwrap_or(now);
        info!(from_date, "polling homework statuses");
        let payload = self.api.fetch(from_date).await?;
        let homeworks = check_response(&payload)?;
        let message = match homeworks.first() {
            Some(latest) => Some(self.tracker.describe(latest)?),
            None => None,
        };
        // Failed cycles keep the old window so the next poll covers it again.
        self.cursor = Some(now);
        Ok(message)
    }

    /// Poll forever, sleeping the same interval after every cycle.
    pub async fn run(mut self) -> Infallible {
        info!(
            interval_secs = self.retry_interval.as_secs(),
            policy = ?self.tracker.policy(),
            "starting review watcher"
        );
        loop {
            let now = Utc::now().timestamp();
            self.run_cycle(now).await;
            tokio::time::sleep(self.retry_interval).await;
        }
    }
}

/// Startup gate: logs the fatal condition when any credential is blank.
pub fn check_credentials(credentials: &Credentials) -> Result<(), ConfigError> {
    if let Err(err) = credentials.ensure_present() {
        error!(%err, "fatal: missing required environment variables at startup");
        return Err(err);
    }
    info!("credentials verified");
    Ok(())
}

/// Verify credentials, then hand control to the loop. Only returns when the
/// credentials are incomplete.
pub async fn watch(
    credentials: &Credentials,
    poll_loop: PollLoop,
) -> Result<Infallible, ConfigError> {
    check_credentials(credentials)?;
    Ok(poll_loop.run().await)
}
