use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictorError>;

/// Failures at the file and serialization boundary.
///
/// Training, prediction and correction lookups are total and never produce
/// one of these.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("I/O error while {context} ({}): {source}", .path.display())]
    Io {
        context: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to move temporary file into {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed correction entry on line {line}: {content:?}")]
    MalformedCorrection { line: usize, content: String },
    #[error("Count for {word:?} after {context:?} does not fit in 64 bits")]
    CountOverflow { context: String, word: String },
    #[error("Context key must be two words separated by a space, got {0:?}")]
    InvalidContextKey(String),
}

impl PredictorError {
    pub fn io(context: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PredictorError::Io {
            context: context.into(),
            path: path.into(),
            source,
        }
    }
}
