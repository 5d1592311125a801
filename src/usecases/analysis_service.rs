//! Analysis service. Orchestrates the building analysis pipeline.
//!
//! Quality gate, knowledge retrieval, then one multimodal completion.
//! Provider failures past the gate are folded into the reply text, never
//! raised to the handler.

use crate::domain::{DomainError, ValidationResult, image_quality};
use crate::ports::AiPort;
use std::sync::Arc;
use tracing::{info, warn};

/// Substituted when the retrieval call yields no recognizable text.
pub const RETRIEVAL_FALLBACK: &str = "Retrieved architectural context.";

/// Service for image-grounded building analysis.
///
/// Orchestrates the flow, strictly sequential:
/// 1. Run the image quality gate; reject junk captures without spending a call
/// 2. Retrieve supplementary architectural context for the prompt
/// 3. Send image + prompt + context to the vision model
/// 4. Return the narrative reply
pub struct AnalysisService {
    ai: Arc<dyn AiPort>,
}

impl AnalysisService {
    pub fn new(ai: Arc<dyn AiPort>) -> Self {
        Self { ai }
    }

    /// Analyze a captured building image against the caller's prompt.
    ///
    /// Always returns `Ok` with reply text once the image decodes: quality
    /// rejections, retrieval failures and vision failures all fold into the
    /// returned narrative. Only a decode failure is an `Err` (the handler
    /// reports it as an internal error).
    pub async fn analyze(&self, image: &[u8], prompt: &str) -> Result<String, DomainError> {
        match image_quality::validate(image)? {
            ValidationResult::Invalid { reason } => {
                info!(%reason, image_len = image.len(), "image rejected by quality gate");
                return Ok(format!(
                    "Analysis is not possible: {} Please capture clearer views \
                     of the building and try again.",
                    reason
                ));
            }
            ValidationResult::Valid => {}
        }

        let retrieved = match self.ai.retrieve_knowledge(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "knowledge retrieval failed, continuing with error text");
                format!("Retrieval Error: {}", e)
            }
        };
        let context = if retrieved.trim().is_empty() {
            RETRIEVAL_FALLBACK.to_string()
        } else {
            retrieved
        };

        match self.ai.analyze_building(image, prompt, &context).await {
            Ok(analysis) => {
                info!(analysis_len = analysis.len(), "analysis complete");
                Ok(analysis)
            }
            Err(e) => {
                warn!(error = %e, "vision analysis failed, folding into reply");
                Ok(format!("Error analyzing image: {}", e))
            }
        }
    }
}
