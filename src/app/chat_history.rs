use crate::domain::error::{MarketError, MarketResult};
use crate::domain::model::{
    AppendChatMessage, AskAssistant, AssistantReply, ChatHistory, ChatMessage, ChatSender,
};
use crate::infra::assistant::AssistantModel;
use crate::storage::MarketStore;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Trip-planning assistant: relays questions to the model and keeps each
/// user's transcript.
#[derive(Clone)]
pub struct ChatHistoryService {
    store: Arc<dyn MarketStore>,
    assistant: Arc<dyn AssistantModel>,
}

impl ChatHistoryService {
    pub fn new(store: Arc<dyn MarketStore>, assistant: Arc<dyn AssistantModel>) -> Self {
        Self { store, assistant }
    }

    /// Asks the model and records the exchange as a user message followed by
    /// the bot reply. A model failure records nothing.
    pub async fn ask(&self, request: AskAssistant) -> MarketResult<AssistantReply> {
        request.validate()?;

        let reply = match self.assistant.reply(&request.message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(user_id = %request.user_id, error = %e, "assistant did not answer");
                return Err(MarketError::Upstream("Failed to get AI response".to_string()));
            }
        };

        let now = Utc::now();
        let exchange = [
            ChatMessage {
                sender: ChatSender::User,
                text: request.message,
                timestamp: now,
            },
            ChatMessage {
                sender: ChatSender::Bot,
                text: reply.clone(),
                timestamp: now,
            },
        ];
        self.store.append_chat_messages(request.user_id, &exchange).await?;
        Ok(AssistantReply { reply })
    }

    pub async fn append(&self, request: AppendChatMessage) -> MarketResult<ChatHistory> {
        request.validate()?;
        let user_id = request.user_id;
        let message = request.into_message();
        self.store.append_chat_messages(user_id, &[message]).await
    }

    /// The user's transcript; empty when they never chatted.
    pub async fn history(&self, user_id: Uuid) -> MarketResult<ChatHistory> {
        Ok(self
            .store
            .chat_history(user_id)
            .await?
            .unwrap_or_else(|| ChatHistory::empty(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::assistant::DisabledAssistant;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl AssistantModel for Echo {
        async fn reply(&self, message: &str) -> anyhow::Result<String> {
            Ok(format!("You asked: {}", message))
        }
    }

    fn service(assistant: Arc<dyn AssistantModel>) -> (Arc<MemoryStore>, ChatHistoryService) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), ChatHistoryService::new(store, assistant))
    }

    fn ask(user_id: Uuid, message: &str) -> AskAssistant {
        AskAssistant {
            user_id,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn answered_question_is_recorded_as_an_exchange() {
        let (_, chat) = service(Arc::new(Echo));
        let user = Uuid::new_v4();

        let answer = chat.ask(ask(user, "Where to stay in Goa?")).await.unwrap();
        assert_eq!(answer.reply, "You asked: Where to stay in Goa?");
        chat.ask(ask(user, "And in Manali?")).await.unwrap();

        let history = chat.history(user).await.unwrap();
        let turns: Vec<(ChatSender, &str)> = history
            .messages
            .iter()
            .map(|m| (m.sender, m.text.as_str()))
            .collect();
        assert_eq!(
            turns,
            vec![
                (ChatSender::User, "Where to stay in Goa?"),
                (ChatSender::Bot, "You asked: Where to stay in Goa?"),
                (ChatSender::User, "And in Manali?"),
                (ChatSender::Bot, "You asked: And in Manali?"),
            ]
        );
    }

    #[tokio::test]
    async fn model_failure_leaves_the_transcript_untouched() {
        let (_, chat) = service(Arc::new(DisabledAssistant));
        let user = Uuid::new_v4();

        let err = chat.ask(ask(user, "hello")).await.unwrap_err();
        assert!(matches!(err, MarketError::Upstream(_)));
        assert!(chat.history(user).await.unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn blank_question_is_rejected_before_the_model_is_called() {
        let (_, chat) = service(Arc::new(DisabledAssistant));
        let err = chat.ask(ask(Uuid::new_v4(), "   ")).await.unwrap_err();
        assert!(matches!(err, MarketError::Validation(_)));
    }

    #[tokio::test]
    async fn unreachable_store_fails_the_exchange() {
        let (store, chat) = service(Arc::new(Echo));
        store.set_offline(true);
        let err = chat.ask(ask(Uuid::new_v4(), "hello")).await.unwrap_err();
        assert!(matches!(err, MarketError::Persistence(_)));
    }

    #[tokio::test]
    async fn appended_messages_keep_their_sender() {
        let (_, chat) = service(Arc::new(DisabledAssistant));
        let user = Uuid::new_v4();
        chat.append(AppendChatMessage {
            user_id: user,
            sender: ChatSender::Bot,
            text: "Welcome!".into(),
        })
        .await
        .unwrap();
        let history = chat.history(user).await.unwrap();
        assert_eq!(history.messages.len(), 1);
        assert_eq!(history.messages[0].sender, ChatSender::Bot);
    }
}
