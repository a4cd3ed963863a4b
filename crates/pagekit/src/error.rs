//! Error types for the HTTP-facing helpers.

use pagekit_render::TemplateError;
use thiserror::Error;

/// Errors raised by the JSON and render helpers.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The request body was not declared as `application/json`.
    #[error("content type must be application/json, got {}", found.as_deref().unwrap_or("none"))]
    ContentType { found: Option<String> },

    /// The payload could not be encoded or decoded.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// A template could not be loaded or executed.
    #[error(transparent)]
    Render(#[from] TemplateError),
}

/// A failure while composing or executing an extension page.
#[derive(Debug, Error)]
#[error("extension {extension}: {source}")]
pub struct ExtensionError {
    pub extension: String,
    #[source]
    pub source: TemplateError,
}

impl ExtensionError {
    pub(crate) fn new(extension: &str, source: TemplateError) -> Self {
        Self {
            extension: extension.to_string(),
            source,
        }
    }
}
