//! Completion client for turning prompts into SQL text.
//!
//! The pipeline talks to the model through the [`CompletionClient`] trait;
//! the server tests substitute a scripted implementation, the binary wires
//! in [`GeminiClient`].

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by the generation stage. Each is shown to the user as
/// plain text; there is no retry policy.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The API key env var was absent at process start; every generation
    /// attempt fails the same way until the process restarts.
    #[error("completion model is not configured: GOOGLE_API_KEY is not set")]
    MissingApiKey,
    #[error("completion request failed: HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion response contained no text candidate")]
    MalformedResponse,
    /// The model stopped answering; distinct from an HTTP failure.
    #[error("completion request timed out after {0}s (upstream timeout)")]
    Timeout(u64),
}

/// A remote text-generation model that completes a prompt.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit a prompt and return the raw completion text.
    async fn complete(
        &self,
        prompt: &str,
        stop_sequences: &[&str],
    ) -> Result<String, CompletionError>;
}
