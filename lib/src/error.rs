use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error taxonomy for the core components. Divergence found by the
/// consistency checker is reported as data, never as one of these.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("signed artifact {artifact} diverges from the unsigned transaction at field `{field}`")]
    Mismatch { field: String, artifact: String },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("query against {context} failed: {message}")]
    Query { context: String, message: String },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn mismatch(field: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self::Mismatch {
            field: field.into(),
            artifact: artifact.into(),
        }
    }

    pub fn query(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            context: context.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
