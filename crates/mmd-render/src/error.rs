//! Render error types.

/// Errors surfaced by engine acquisition and rendering.
///
/// The variants carry plain strings so a failed computation can be cloned
/// out of the shared cache entry to every concurrent requester.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("failed to load diagram engine: {0}")]
    EngineLoad(String),

    #[error("diagram render failed: {0}")]
    Render(String),
}
