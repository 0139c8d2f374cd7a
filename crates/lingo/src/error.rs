//! CLI error types.

use lingo_config::ConfigError;
use lingo_content::ContentError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Entry {entry} not found in {language}")]
    UnknownEntry { language: String, entry: String },
}
