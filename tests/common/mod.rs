#![allow(dead_code)]

use async_trait::async_trait;
use review_watchbot::error::{DeliveryError, WatchError};
use review_watchbot::notifier::MessageSink;
use review_watchbot::practicum::HomeworkApi;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn payload(name: &str, status: &str) -> Value {
    json!({
        "homeworks": [
            {"homework_name": name, "status": status, "reviewer_comment": ""}
        ],
        "current_date": 1_700_000_000
    })
}

#[derive(Clone, Default)]
pub struct RecordingApi {
    responses: Arc<Mutex<VecDeque<Result<Value, WatchError>>>>,
    calls: Arc<Mutex<Vec<i64>>>,
}

impl RecordingApi {
    pub fn with_responses(responses: Vec<Result<Value, WatchError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..Default::default()
        }
    }

    pub async fn calls(&self) -> Vec<i64> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl HomeworkApi for RecordingApi {
    async fn fetch(&self, from_date: i64) -> Result<Value, WatchError> {
        self.calls.lock().await.push(from_date);
        let mut guard = self.responses.lock().await;
        guard
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"homeworks": []})))
    }
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub async fn messages(&self) -> Vec<String> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        self.messages.lock().await.push(text.to_string());
        if self.fail {
            return Err(DeliveryError("bot was blocked by the user".into()));
        }
        Ok(())
    }
}
