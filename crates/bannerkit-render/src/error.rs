//! Renderer errors.

use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    /// The call cannot proceed in the current state, e.g. export before any render.
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Asset load failed: {0}")]
    AssetLoad(String),
    #[error("Encoding failed: {0}")]
    Encoding(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;
