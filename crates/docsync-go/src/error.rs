//! Error types for docsync-go

use std::path::PathBuf;

/// Result type for docsync-go operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading Go source
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("Failed to parse {file}")]
    Parse { file: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn parse(file: impl Into<String>) -> Self {
        Self::Parse { file: file.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
