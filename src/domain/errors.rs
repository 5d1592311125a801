//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Image error: {0}")]
    Image(String),

    #[error("AI provider error: {0}")]
    Ai(String),
}
