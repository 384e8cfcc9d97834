use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{error, info};

use crate::error::DeliveryError;

/// Transport that carries a plain-text message to the operator.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Delivers through the Telegram Bot API to one fixed chat.
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
    chat: Recipient,
}

impl fmt::Debug for TelegramSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSink")
            .field("chat", &self.chat)
            .finish_non_exhaustive()
    }
}

impl TelegramSink {
    pub fn new(bot: Bot, chat_id: &str) -> Self {
        Self {
            bot,
            chat: parse_recipient(chat_id),
        }
    }

    pub fn from_token(token: &str, chat_id: &str) -> Self {
        Self::new(Bot::new(token), chat_id)
    }
}

/// Numeric ids address chats directly; anything else is treated as a
/// public `@channel` username.
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let trimmed = chat_id.trim();
    match trimmed.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(trimmed.to_string()),
    }
}

#[async_trait]
impl MessageSink for TelegramSink {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(self.chat.clone(), text)
            .await
            .map(|_| ())
            .map_err(|err| DeliveryError(err.to_string()))
    }
}

/// Best-effort notifier: delivery failures are logged and dropped.
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn MessageSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self { sink }
    }

    pub async fn send(&self, message: &str) {
        match self.sink.deliver(message).await {
            Ok(()) => info!("message sent"),
            Err(err) => error!(%err, "failed to send message to Telegram"),
        }
    }
}
