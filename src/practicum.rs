use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::WatchError;
use crate::model::Homework;

pub const PRACTICUM_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch submissions changed since `from_date` (unix seconds). The body is
    /// returned as parsed JSON without any shape checks.
    async fn fetch(&self, from_date: i64) -> Result<Value, WatchError>;
}

#[derive(Clone)]
pub struct PracticumClient {
    http: Client,
    endpoint: Url,
    token: String,
    timeout: Duration,
}

impl fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl PracticumClient {
    pub fn new(token: String, endpoint: Url, timeout: Duration) -> Result<Self, WatchError> {
        let http = Client::builder()
            .user_agent(concat!("review-watchbot/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()?;
        Ok(Self {
            http,
            endpoint,
            token,
            timeout,
        })
    }

    pub fn build_request(&self, from_date: i64) -> Result<reqwest::Request, WatchError> {
        Ok(self
            .http
            .get(self.endpoint.clone())
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .timeout(self.timeout)
            .build()?)
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, WatchError> {
        let request = self.build_request(from_date)?;
        debug!(url=%request.url(), "requesting homework statuses");
        let res = self.http.execute(request).await.map_err(|err| {
            error!(?err, "homework endpoint unreachable");
            WatchError::from(err)
        })?;

        // Only a plain 200 carries the homework list.
        if res.status() != StatusCode::OK {
            let status = res.status();
            error!(%status, "homework endpoint unavailable");
            return Err(WatchError::from_status(status));
        }

        let body: Value = res.json().await.map_err(|err| {
            error!(?err, "homework endpoint returned an undecodable body");
            WatchError::from(err)
        })?;
        Ok(body)
    }
}

/// Pull the `homeworks` list out of a payload. Individual records are not
/// checked; missing fields surface as `None` on `Homework`.
pub fn check_response(payload: &Value) -> Result<Vec<Homework>, WatchError> {
    let homeworks = payload
        .get("homeworks")
        .ok_or_else(|| WatchError::MalformedResponse("missing `homeworks` field".into()))?;
    let list = homeworks.as_array().ok_or_else(|| {
        WatchError::MalformedResponse(format!(
            "`homeworks` is not a list: {}",
            json_kind(homeworks)
        ))
    })?;
    Ok(list.iter().map(Homework::from_value).collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
