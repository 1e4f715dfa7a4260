//! Error types for policy loading.

/// Errors that can occur while loading a policy document.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/deserialization error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Policy validation error (e.g. duplicate rule ids).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias for policy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;
