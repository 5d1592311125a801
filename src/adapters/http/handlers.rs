//! Request handlers. Map the HTTP surface onto the use cases.
//!
//! Error contract: missing inputs are 400 with fixed strings; decode and
//! unexpected errors are 500; provider failures inside the analysis pipeline
//! stay 200 (folded into the reply by the service), while chat provider
//! failures surface as 500.

use crate::adapters::http::AppState;
use crate::adapters::http::messages::{
    AnalyzeRequest, AnalyzeResponse, ChatRequest, ChatResponse, ErrorResponse,
};
use crate::domain::DomainError;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;
use tracing::{debug, warn};

pub const NO_IMAGE_ERROR: &str = "No image data provided";
pub const NO_MESSAGE_ERROR: &str = "No message provided";

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };

    let Some(image_field) = body.image.as_deref().filter(|s| !s.is_empty()) else {
        return bad_request(NO_IMAGE_ERROR);
    };

    let image = match decode_image_field(image_field) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "image payload decode failed");
            return internal_error(&e);
        }
    };

    debug!(image_len = image.len(), "image payload decoded");

    match state.analysis.analyze(&image, body.prompt_or_default()).await {
        Ok(analysis) => (StatusCode::OK, Json(AnalyzeResponse { analysis })).into_response(),
        Err(e) => {
            warn!(error = %e, "analyze request failed");
            internal_error(&e)
        }
    }
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };

    let Some(message) = body.message.as_deref().filter(|s| !s.is_empty()) else {
        return bad_request(NO_MESSAGE_ERROR);
    };

    match state.chat.chat(message).await {
        Ok(response) => (StatusCode::OK, Json(ChatResponse { response })).into_response(),
        Err(e) => {
            warn!(error = %e, "chat request failed");
            internal_error(&e)
        }
    }
}

/// Redirect stub pointing browsers at the front-end dev server.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        r#"<html>
    <head>
        <meta http-equiv="refresh" content="0;URL='{}'" />
    </head>
    <body>
        <p>Redirecting to development server...</p>
    </body>
</html>"#,
        state.frontend_url
    ))
}

/// Strip an optional `data:image…,` prefix and decode the base64 payload.
///
/// A prefixed and a bare payload with identical bytes decode identically.
pub fn decode_image_field(raw: &str) -> Result<Vec<u8>, DomainError> {
    let payload = if raw.starts_with("data:image") {
        raw.split_once(',').map(|(_, rest)| rest).unwrap_or(raw)
    } else {
        raw
    };
    BASE64
        .decode(payload)
        .map_err(|e| DomainError::Image(format!("invalid base64 image data: {}", e)))
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn internal_error(error: &DomainError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}
