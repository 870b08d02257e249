//! Error types for docsync-content

/// Result type for docsync-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in docsync-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed dividing line at byte {position}: {message}")]
    Format { position: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn format(position: usize, message: impl Into<String>) -> Self {
        Self::Format {
            position,
            message: message.into(),
        }
    }
}
