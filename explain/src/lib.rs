//! Narrative explanations of day-over-day VaR changes
//!
//! Builds a templated risk-analyst prompt from two VaR figures and a driver
//! list, and sends it to an OpenAI-compatible chat-completions endpoint.
//! The risk engine has no dependency on this crate; prompt construction is
//! pure and testable without network access.

pub mod client;
pub mod prompt;

pub use client::{ExplainConfig, Explainer};
pub use error::{ExplainError, Result};
pub use prompt::build_explain_prompt;

mod error {
    use thiserror::Error;

    /// Errors from the explanation client
    #[derive(Error, Debug)]
    pub enum ExplainError {
        #[error("HTTP error: {0}")]
        Http(#[from] reqwest::Error),

        #[error("API error: {0}")]
        Api(String),

        #[error("Configuration error: {0}")]
        Config(String),
    }

    pub type Result<T> = std::result::Result<T, ExplainError>;
}
