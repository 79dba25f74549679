//! The `ProjectGenerator` trait -- the narrow port over the generation
//! service.
//!
//! The rest of the crate only ever sees this trait and its error type, so
//! the concrete service integration (currently Gemini) is swappable without
//! touching the session or the studio. The trait is object-safe so it can
//! be shared as `Arc<dyn ProjectGenerator>`.

use async_trait::async_trait;
use thiserror::Error;

use crate::project::GeneratedProject;

pub mod gemini;

pub use gemini::{DEFAULT_MODEL, GeminiClient, GeminiOptions};

/// Errors from one generation attempt.
///
/// Display output and sources are diagnostic detail; anything shown to the
/// user goes through [`GenerationError::user_message`] instead.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key was injected. Raised before any network attempt.
    #[error("no API key configured (set GEMINI_API_KEY or add api_key to the config file)")]
    MissingApiKey,

    /// The HTTP request itself failed (connect, timeout, TLS, ...).
    #[error("request to the generation service failed")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("generation service returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response envelope was not the expected service JSON.
    #[error("malformed generation service response")]
    MalformedResponse(#[source] serde_json::Error),

    /// The service returned no candidate text to parse.
    #[error("generation service returned no candidate text")]
    EmptyResponse,

    /// The candidate text was not a complete project: not JSON, or one of
    /// the four required fields is missing or not a string.
    #[error("generated payload is not a valid project")]
    InvalidPayload(#[source] serde_json::Error),
}

impl GenerationError {
    /// Fixed, user-safe message for display.
    ///
    /// Independent of the underlying failure detail -- the raw cause is
    /// only ever written to the diagnostic log. The missing-key case gets
    /// its own message because the user can act on it.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingApiKey => {
                "API key is not configured. Set GEMINI_API_KEY and try again."
            }
            _ => {
                "Failed to generate project. The API returned an invalid response \
                 or an error occurred."
            }
        }
    }
}

/// Port over the generation service.
///
/// Exactly one outbound call per invocation; no retries, no caching. Either
/// a fully populated project comes back or a [`GenerationError`] -- there is
/// no partial result.
#[async_trait]
pub trait ProjectGenerator: Send + Sync {
    /// Generate a project from the given brief.
    async fn generate(&self, brief: &str) -> Result<GeneratedProject, GenerationError>;
}

// Compile-time assertion: the port must stay object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn ProjectGenerator) {}
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
