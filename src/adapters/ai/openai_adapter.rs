//! OpenAI-compatible adapter for knowledge retrieval, vision analysis and chat.
//!
//! Supports OpenAI API, Azure OpenAI, and any OpenAI-compatible endpoint.
//! Implements `AiPort`; owns the system prompts and the chat-completions
//! wire format, including multimodal content parts.

use crate::domain::DomainError;
use crate::ports::AiPort;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenAI-compatible AI adapter.
///
/// Text-only calls (retrieval, chat) use `chat_model`; the building analysis
/// call uses `vision_model` with its reply capped at `max_analysis_tokens`.
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    chat_model: String,
    vision_model: String,
    max_analysis_tokens: u32,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key
    /// * `chat_model` - Model for text-only calls (e.g., "gpt-4o-mini")
    /// * `vision_model` - Model for multimodal calls (e.g., "gpt-4o")
    /// * `max_analysis_tokens` - Output token cap for the analysis reply
    /// * `timeout` - Client-side timeout applied to every provider call
    pub fn new(
        api_url: String,
        api_key: String,
        chat_model: String,
        vision_model: String,
        max_analysis_tokens: u32,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            api_url,
            api_key,
            chat_model,
            vision_model,
            max_analysis_tokens,
        }
    }

    /// System instruction for the knowledge-retrieval call.
    fn retrieval_system_prompt() -> &'static str {
        "You are an expert in architectural design and sustainability. \
         Provide relevant information about architectural concepts that can \
         help analyze the provided query."
    }

    /// System instruction for the four-view building analysis. The model is
    /// told to re-verify the image itself and decline gracefully if unclear.
    fn analysis_system_prompt() -> &'static str {
        "You are an expert in sustainable architectural design, analyzing \
         buildings with technical knowledge. The image provided shows a \
         **single building with four different views**. Analyze the \
         **architectural design elements, sustainability features, and \
         functional performance** across all four views collectively. Also, \
         integrate retrieved architectural insights into your response. If \
         the image is unclear or does not show a building, say so and \
         decline gracefully."
    }

    /// Persona for the plain chat relay.
    fn chat_system_prompt() -> &'static str {
        "You are a helpful assistant specializing in architectural design \
         and 3D visualization."
    }

    /// User turn for the analysis call: fixed instruction, caller's prompt,
    /// then the retrieved supplementary text.
    fn analysis_user_prompt(prompt: &str, context: &str) -> String {
        format!(
            "Analyze the four views of the building holistically. {} \n\nAdditional Context: {}",
            prompt, context
        )
    }

    /// Embed raw JPEG bytes as a base64 data URI for the vision payload.
    fn image_data_uri(image_jpeg: &[u8]) -> String {
        format!("data:image/jpeg;base64,{}", BASE64.encode(image_jpeg))
    }

    /// Send one chat-completions request and extract the reply text.
    async fn complete(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        max_tokens: Option<u32>,
    ) -> Result<String, DomainError> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages,
            max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Ai(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(DomainError::Ai(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Ai(format!("Failed to parse API response: {}", e)))?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| DomainError::Ai("No response choices returned".to_string()))?;

        debug!(reply_len = content.len(), "received AI response");

        Ok(content)
    }
}

/// Chat-completions request structure.
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: MessageContent,
}

impl ChatMessage {
    fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: MessageContent::Text(content.into()),
        }
    }
}

/// Plain text for text-only turns, content parts for multimodal turns.
#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

/// Chat-completions response structure.
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait::async_trait]
impl AiPort for OpenAiAdapter {
    async fn retrieve_knowledge(&self, query: &str) -> Result<String, DomainError> {
        info!(query_len = query.len(), "retrieving architectural context");

        let messages = vec![
            ChatMessage::text("system", Self::retrieval_system_prompt()),
            ChatMessage::text("user", query),
        ];

        self.complete(&self.chat_model, messages, None).await
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
            context_len = context.len(),
            "sending image to vision model"
        );

        let messages = vec![
            ChatMessage::text("system", Self::analysis_system_prompt()),
            ChatMessage {
                role: "user".to_string(),
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: Self::analysis_user_prompt(prompt, context),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: Self::image_data_uri(image_jpeg),
                        },
                    },
                ]),
            },
        ];

        let analysis = self
            .complete(&self.vision_model, messages, Some(self.max_analysis_tokens))
            .await?;

        info!(analysis_len = analysis.len(), "vision analysis complete");

        Ok(analysis)
    }

    async fn chat(&self, message: &str) -> Result<String, DomainError> {
        info!(message_len = message.len(), "relaying chat message");

        let messages = vec![
            ChatMessage::text("system", Self::chat_system_prompt()),
            ChatMessage::text("user", message),
        ];

        self.complete(&self.chat_model, messages, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_data_uri_prefix() {
        let uri = OpenAiAdapter::image_data_uri(&[0xFF, 0xD8, 0xFF]);
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(uri, "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_analysis_user_prompt_layout() {
        let prompt = OpenAiAdapter::analysis_user_prompt("Is it passive solar?", "Context here.");
        assert!(prompt.starts_with("Analyze the four views of the building holistically. "));
        assert!(prompt.contains("Is it passive solar?"));
        assert!(prompt.ends_with("\n\nAdditional Context: Context here."));
    }

    #[test]
    fn test_multimodal_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                ChatMessage::text("system", "sys"),
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: "look".to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: "data:image/jpeg;base64,AAAA".to_string(),
                            },
                        },
                    ]),
                },
            ],
            max_tokens: Some(700),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_tokens"], 700);
        assert_eq!(value["messages"][0]["content"], "sys");
        assert_eq!(value["messages"][1]["content"][0]["type"], "text");
        assert_eq!(value["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            value["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,AAAA"
        );
    }

    #[test]
    fn test_max_tokens_omitted_when_unset() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::text("user", "hi")],
            max_tokens: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("max_tokens").is_none());
    }
}
