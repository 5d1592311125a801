//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_service;
pub mod chat_service;

pub use analysis_service::AnalysisService;
pub use chat_service::ChatService;
