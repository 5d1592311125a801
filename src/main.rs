//! Wiring & DI. Entry point: bootstrap adapters, inject into services, serve.
//! No business logic here.

use archsight::adapters::ai::{MockAiAdapter, OpenAiAdapter};
use archsight::adapters::http::{AppState, router};
use archsight::ports::AiPort;
use archsight::shared::config::AppConfig;
use archsight::usecases::{AnalysisService, ChatService};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_default();

    // --- AI provider adapter ---
    let ai: Arc<dyn AiPort> = if cfg.is_ai_configured() {
        info!(
            chat_model = %cfg.chat_model_or_default(),
            vision_model = %cfg.vision_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "provider relay enabled with OpenAI adapter"
        );
        Arc::new(OpenAiAdapter::new(
            cfg.ai_api_url_or_default(),
            cfg.ai_api_key().unwrap_or_default(),
            cfg.chat_model_or_default(),
            cfg.vision_model_or_default(),
            cfg.max_analysis_tokens_or_default(),
            Duration::from_secs(cfg.request_timeout_secs_or_default()),
        ))
    } else {
        warn!("ARCHSIGHT_AI_API_KEY not set, using mock AI adapter");
        Arc::new(MockAiAdapter::new())
    };

    // --- Services ---
    let state = Arc::new(AppState {
        analysis: AnalysisService::new(Arc::clone(&ai)),
        chat: ChatService::new(ai),
        frontend_url: cfg.frontend_url_or_default(),
    });

    let app = router(state);

    let addr = format!("{}:{}", cfg.host_or_default(), cfg.port_or_default());
    info!(%addr, frontend = %cfg.frontend_url_or_default(), "listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
