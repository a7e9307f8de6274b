//! Generation client trait and common types.

use crate::error::Result;
use crate::prompt::Prompt;
use async_trait::async_trait;

/// Media produced by an image-generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMedia {
    /// MIME type of the generated image.
    pub mime_type: String,

    /// The image as a self-describing data URI.
    pub data_uri: String,
}

/// An external generation capability.
///
/// Each method makes exactly one call to the backend; retries, if any, are
/// the caller's responsibility.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Run one structured (JSON-mode) completion for the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the response carries no
    /// parseable JSON.
    async fn generate_json(&self, prompt: &Prompt) -> Result<serde_json::Value>;

    /// Run one text+image completion for the prompt.
    ///
    /// Returns `Ok(None)` when the backend answered but produced no media;
    /// callers decide whether that is a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the call itself fails.
    async fn generate_image(&self, prompt: &Prompt) -> Result<Option<GeneratedMedia>>;
}
