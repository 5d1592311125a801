//! Application configuration. API credentials, models, bind address.

use serde::Deserialize;

/// Reference output-token cap for the vision reply. Configurable upper
/// bound, not a hard law.
pub const DEFAULT_MAX_ANALYSIS_TOKENS: u32 = 700;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// AI API key (e.g., OpenAI). Read from ARCHSIGHT_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// AI API URL. Defaults to OpenAI. Read from ARCHSIGHT_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model for text-only calls (retrieval, chat). Read from ARCHSIGHT_CHAT_MODEL.
    #[serde(default)]
    pub chat_model: Option<String>,

    /// Model for the multimodal analysis call. Read from ARCHSIGHT_VISION_MODEL.
    #[serde(default)]
    pub vision_model: Option<String>,

    /// Output token cap for the analysis reply. Read from ARCHSIGHT_MAX_ANALYSIS_TOKENS.
    #[serde(default)]
    pub max_analysis_tokens: Option<u32>,

    /// Client-side timeout for provider calls, in seconds. Read from
    /// ARCHSIGHT_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Bind host. Read from ARCHSIGHT_HOST.
    #[serde(default)]
    pub host: Option<String>,

    /// Bind port. Read from ARCHSIGHT_PORT.
    #[serde(default)]
    pub port: Option<u16>,

    /// Front-end dev server the index stub redirects to. Read from
    /// ARCHSIGHT_FRONTEND_URL.
    #[serde(default)]
    pub frontend_url: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("ARCHSIGHT"));
        if let Ok(path) = std::env::var("ARCHSIGHT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let cfg: Self = c.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Returns the AI API key if configured. Reads from config or ARCHSIGHT_AI_API_KEY env.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("ARCHSIGHT_AI_API_KEY").ok())
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .or_else(|| std::env::var("ARCHSIGHT_AI_API_URL").ok())
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    /// Returns the text model name. Defaults to "gpt-4o-mini".
    pub fn chat_model_or_default(&self) -> String {
        self.chat_model
            .clone()
            .or_else(|| std::env::var("ARCHSIGHT_CHAT_MODEL").ok())
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    /// Returns the vision model name. Defaults to "gpt-4o".
    pub fn vision_model_or_default(&self) -> String {
        self.vision_model
            .clone()
            .or_else(|| std::env::var("ARCHSIGHT_VISION_MODEL").ok())
            .unwrap_or_else(|| "gpt-4o".to_string())
    }

    /// Returns the analysis output-token cap. Defaults to 700.
    pub fn max_analysis_tokens_or_default(&self) -> u32 {
        self.max_analysis_tokens
            .unwrap_or(DEFAULT_MAX_ANALYSIS_TOKENS)
    }

    /// Returns the provider call timeout in seconds. Defaults to 60.
    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(60)
    }

    /// Returns the bind host. Defaults to "0.0.0.0".
    pub fn host_or_default(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| "0.0.0.0".to_string())
    }

    /// Returns the bind port. Defaults to 5000.
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(5000)
    }

    /// Returns the front-end URL the index stub points at.
    pub fn frontend_url_or_default(&self) -> String {
        self.frontend_url
            .clone()
            .unwrap_or_else(|| "http://localhost:3000".to_string())
    }

    /// Returns true if AI is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }
}
