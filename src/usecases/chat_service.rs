//! Chat service. Single-turn relay to the hosted chat model.
//!
//! Unlike the analysis pipeline, provider errors propagate: the handler
//! reports them as internal errors instead of folding them into the reply.

use crate::domain::DomainError;
use crate::ports::AiPort;
use std::sync::Arc;
use tracing::info;

/// Stateless chat passthrough. No conversation memory across calls.
pub struct ChatService {
    ai: Arc<dyn AiPort>,
}

impl ChatService {
    pub fn new(ai: Arc<dyn AiPort>) -> Self {
        Self { ai }
    }

    /// Relay one message to the assistant persona and return its reply.
    pub async fn chat(&self, message: &str) -> Result<String, DomainError> {
        info!(message_len = message.len(), "chat relay");
        self.ai.chat(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiAdapter;

    #[tokio::test]
    async fn test_chat_passthrough() {
        let svc = ChatService::new(Arc::new(MockAiAdapter::with_delay(1)));
        let reply = svc.chat("What is a cantilever?").await.unwrap();
        assert!(reply.contains("What is a cantilever?"));
    }

    #[tokio::test]
    async fn test_chat_errors_propagate() {
        let svc = ChatService::new(Arc::new(MockAiAdapter::with_delay(1).failing_chat()));
        let result = svc.chat("hello").await;
        assert!(matches!(result, Err(DomainError::Ai(_))));
    }
}
