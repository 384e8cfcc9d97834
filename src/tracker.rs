//! Decides what to tell the operator about the latest submission.
use tracing::debug;

use crate::error::WatchError;
use crate::model::{Homework, NotifyPolicy, ReviewStatus};
use crate::status::{status_changed_message, verdict_for, NOTHING_HAPPENED};

#[derive(Debug, Clone, Default)]
pub struct StatusTracker {
    policy: NotifyPolicy,
    last_status: Option<ReviewStatus>,
}

impl StatusTracker {
    pub fn new(policy: NotifyPolicy) -> Self {
        Self {
            policy,
            last_status: None,
        }
    }

    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    /// Last status that produced a change notification. Only tracked under
    /// `NotifyPolicy::OnChange`.
    pub fn last_status(&self) -> Option<ReviewStatus> {
        self.last_status
    }

    /// Produce the message for `homework`. Under `OnChange` an unchanged
    /// status yields the fixed "nothing happened" text without a lookup.
    /// The remembered status is only replaced after the new one is known to
    /// be valid.
    pub fn describe(&mut self, homework: &Homework) -> Result<String, WatchError> {
        let raw = homework.raw_status();
        match self.policy {
            NotifyPolicy::Always => {
                let (_, verdict) = verdict_for(raw)?;
                Ok(status_changed_message(homework.name(), verdict))
            }
            NotifyPolicy::OnChange => {
                let unchanged = matches!(
                    (self.last_status, homework.status.as_deref()),
                    (Some(last), Some(current)) if last.as_str() == current
                );
                if unchanged {
                    debug!(status = raw, "status unchanged");
                    return Ok(NOTHING_HAPPENED.to_string());
                }
                let (status, verdict) = verdict_for(raw)?;
                self.last_status = Some(status);
                Ok(status_changed_message(homework.name(), verdict))
            }
        }
    }
}
