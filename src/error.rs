//! Error kinds raised while polling the review API and relaying notifications.
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that abort a single poll cycle. Each one is caught at the cycle
/// boundary and reported to the operator as a chat message.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Non-success status, or the API could not be reached at all.
    #[error("endpoint unavailable: {0}")]
    EndpointUnavailable(String),
    /// `homeworks` missing or not a list.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("unknown homework status: {0:?}")]
    UnknownStatus(String),
}

impl WatchError {
    pub fn from_status(status: StatusCode) -> Self {
        WatchError::EndpointUnavailable(format!("HTTP {}", status))
    }
}

impl From<reqwest::Error> for WatchError {
    fn from(err: reqwest::Error) -> Self {
        WatchError::EndpointUnavailable(err.to_string())
    }
}

/// Failure of the messaging transport. Never leaves the notifier.
#[derive(Debug, Error)]
#[error("message delivery failed: {0}")]
pub struct DeliveryError(pub String);
