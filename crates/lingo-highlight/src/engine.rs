//! Highlighting engine abstraction.

/// Error produced while constructing or running a highlighting engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    /// The engine could not be built.
    #[error("failed to construct highlighting engine: {0}")]
    Construction(String),
    /// The construction task panicked or was cancelled.
    #[error("highlighting engine construction task failed: {0}")]
    Join(String),
    /// Tokenizing a code sample failed.
    #[error("highlighting failed: {0}")]
    Engine(String),
}

/// A tokenizer that turns source text into syntax-tinted markup.
///
/// Implementations must close every tag on the line it was opened on, so the
/// output can be split on `\n` by [`emphasize_lines`](crate::emphasize_lines).
/// Unsupported language ids fall back to a default tokenizer instead of
/// failing.
pub trait HighlightEngine: Send + Sync + 'static {
    /// Highlight `code` as `language`.
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;

    /// Whether `language` has a dedicated tokenizer.
    fn supports(&self, language: &str) -> bool;
}
