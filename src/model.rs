use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Review states reported by the homework API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "approved" => Some(ReviewStatus::Approved),
            "reviewing" => Some(ReviewStatus::Reviewing),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }
}

/// Whether repeated statuses are suppressed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    /// Notify only when the status differs from the last one notified.
    #[default]
    OnChange,
    /// Notify on every cycle that returns a submission.
    Always,
}

/// One submission as returned by the API. Fields are kept raw; a missing or
/// non-string value is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Homework {
    pub homework_name: Option<String>,
    pub status: Option<String>,
}

impl Homework {
    pub fn new(name: &str, status: &str) -> Self {
        Self {
            homework_name: Some(name.to_string()),
            status: Some(status.to_string()),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            homework_name: field("homework_name"),
            status: field("status"),
        }
    }

    pub fn name(&self) -> &str {
        self.homework_name.as_deref().unwrap_or_default()
    }

    pub fn raw_status(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }
}
