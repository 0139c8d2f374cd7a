//! Content loading errors.

use std::path::PathBuf;

/// Error returned when corpus files cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Content directory does not exist.
    #[error("Content directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading a corpus file.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// YAML corpus file is malformed.
    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// JSON corpus file is malformed.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Two corpus files declare the same language id.
    #[error("Duplicate language id: {0}")]
    DuplicateLanguage(String),
}
