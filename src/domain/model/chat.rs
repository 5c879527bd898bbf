use crate::domain::error::{MarketError, MarketResult};
use crate::domain::model::require_text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Bot,
}

impl ChatSender {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatSender::User => "user",
            ChatSender::Bot => "bot",
        }
    }
}

impl FromStr for ChatSender {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatSender::User),
            "bot" => Ok(ChatSender::Bot),
            other => Err(MarketError::Persistence(format!(
                "unknown chat sender '{}' in store",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// The trip-planning assistant transcript of one user, oldest message first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistory {
    pub user_id: Uuid,
    pub messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            messages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppendChatMessage {
    pub user_id: Uuid,
    pub sender: ChatSender,
    pub text: String,
}

impl AppendChatMessage {
    pub fn validate(&self) -> MarketResult<()> {
        require_text("text", &self.text)
    }

    pub fn into_message(self) -> ChatMessage {
        ChatMessage {
            sender: self.sender,
            text: self.text,
            timestamp: Utc::now(),
        }
    }
}

/// One question for the trip-planning assistant.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskAssistant {
    pub user_id: Uuid,
    pub message: String,
}

impl AskAssistant {
    pub fn validate(&self) -> MarketResult<()> {
        require_text("message", &self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssistantReply {
    pub reply: String,
}
