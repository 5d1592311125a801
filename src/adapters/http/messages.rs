//! Request/response bodies for the HTTP surface.
//!
//! Explicit validated structures at the boundary; missing fields are modeled
//! as `Option` so the handlers can report the fixed 400 error strings instead
//! of a deserialization rejection.

use serde::{Deserialize, Serialize};

/// Prompt used when the caller supplies none.
pub const DEFAULT_PROMPT: &str = "Analyze this building design.";

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64 image payload, with or without a `data:image…,` prefix.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl AnalyzeRequest {
    pub fn prompt_or_default(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
