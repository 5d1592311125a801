//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::DomainError;

/// Hosted LLM provider gateway. One method per completion shape the
/// application needs; prompts and wire format belong to the adapter.
#[async_trait::async_trait]
pub trait AiPort: Send + Sync {
    /// Text-only completion used to pull supplementary architectural context
    /// for a query. Returns the model's reply verbatim.
    async fn retrieve_knowledge(&self, query: &str) -> Result<String, DomainError>;

    /// Multimodal completion over a JPEG capture of four building views.
    ///
    /// - `image_jpeg`: raw image bytes, embedded by the adapter as a base64
    ///   data URI declared `image/jpeg`
    /// - `prompt`: the caller's free-text question
    /// - `context`: retrieved supplementary text (or its fallback)
    async fn analyze_building(
        &self,
        image_jpeg: &[u8],
        prompt: &str,
        context: &str,
    ) -> Result<String, DomainError>;

    /// Single-turn chat passthrough with the fixed assistant persona.
    async fn chat(&self, message: &str) -> Result<String, DomainError>;
}
