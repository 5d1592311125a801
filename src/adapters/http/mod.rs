//! HTTP inbound adapter. Routes the three external operations onto the
//! use cases.

pub mod handlers;
pub mod messages;

use crate::usecases::{AnalysisService, ChatService};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

/// Shared handler state: the wired use cases plus the front-end location
/// the index stub points at.
pub struct AppState {
    pub analysis: AnalysisService,
    pub chat: ChatService,
    pub frontend_url: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/chat", post(handlers::chat))
        .with_state(state)
}
