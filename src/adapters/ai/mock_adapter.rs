//! Mock AI adapter for testing without API calls.
//!
//! Returns hardcoded responses for development and testing purposes, and can
//! simulate per-method provider failures to exercise error-folding paths.

use crate::domain::DomainError;
use crate::ports::AiPort;
use std::time::Duration;
use tracing::info;

/// Mock AI adapter for testing.
///
/// Returns predetermined responses without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    fail_retrieval: bool,
    fail_analysis: bool,
    fail_chat: bool,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self {
            delay_ms: 100,
            fail_retrieval: false,
            fail_analysis: false,
            fail_chat: false,
        }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new()
        }
    }

    /// Make `retrieve_knowledge` fail with a simulated provider error.
    pub fn failing_retrieval(mut self) -> Self {
        self.fail_retrieval = true;
        self
    }

    /// Make `analyze_building` fail with a simulated provider error.
    pub fn failing_analysis(mut self) -> Self {
        self.fail_analysis = true;
        self
    }

    /// Make `chat` fail with a simulated provider error.
    pub fn failing_chat(mut self) -> Self {
        self.fail_chat = true;
        self
    }

    fn simulated_failure(call: &str) -> DomainError {
        DomainError::Ai(format!("[MOCK] simulated provider failure in {}", call))
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AiPort for MockAiAdapter {
    async fn retrieve_knowledge(&self, query: &str) -> Result<String, DomainError> {
        info!(query_len = query.len(), "[MOCK] Simulating knowledge retrieval");

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if self.fail_retrieval {
            return Err(Self::simulated_failure("retrieve_knowledge"));
        }

        Ok(format!(
            "[MOCK] Architectural context for \"{}\": passive solar orientation, \
             cross-ventilation, and envelope performance are the usual levers \
             to evaluate across elevations.",
            query
        ))
    }

    async fn analyze_building(
        &self,
        image_jpeg: &[u8],
        prompt: &str,
        context: &str,
    ) -> Result<String, DomainError> {
        info!(
            image_len = image_jpeg.len(),
            prompt_len = prompt.len(),
            "[MOCK] Simulating vision analysis"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if self.fail_analysis {
            return Err(Self::simulated_failure("analyze_building"));
        }

        // Echo prompt and context so orchestration tests can assert what the
        // vision call actually received.
        Ok(format!(
            "[MOCK] Holistic four-view analysis ({} image bytes). Prompt: {}. \
             Context used: {}",
            image_jpeg.len(),
            prompt,
            context
        ))
    }

    async fn chat(&self, message: &str) -> Result<String, DomainError> {
        info!(message_len = message.len(), "[MOCK] Simulating chat relay");

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if self.fail_chat {
            return Err(Self::simulated_failure("chat"));
        }

        Ok(format!(
            "[MOCK] Assistant reply to \"{}\". In production this would come \
             from the hosted chat model.",
            message
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_adapter_happy_paths() {
        let adapter = MockAiAdapter::with_delay(10);

        let retrieved = adapter.retrieve_knowledge("daylighting").await.unwrap();
        assert!(retrieved.contains("daylighting"));

        let analysis = adapter
            .analyze_building(&[1, 2, 3], "Assess the facade.", "ctx")
            .await
            .unwrap();
        assert!(analysis.contains("Assess the facade."));
        assert!(analysis.contains("ctx"));

        let reply = adapter.chat("hello").await.unwrap();
        assert!(reply.contains("hello"));
    }

    #[tokio::test]
    async fn test_mock_adapter_simulated_failures() {
        let adapter = MockAiAdapter::with_delay(1)
            .failing_retrieval()
            .failing_analysis()
            .failing_chat();

        assert!(adapter.retrieve_knowledge("q").await.is_err());
        assert!(adapter.analyze_building(&[0], "p", "c").await.is_err());
        assert!(adapter.chat("m").await.is_err());
    }
}
