//! Error kinds surfaced by generation.
//!
//! Every failure inside one API's generation collapses into a single
//! [`GenerateError`], which the fleet orchestrator records and moves past.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure while generating one API or the aggregate outputs.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Network or HTTP status failure while retrieving a document
    #[error("failed to fetch {url}: {message}")]
    Fetch {
        /// URL that was requested
        url: String,
        /// Transport-provided description
        message: String,
    },

    /// A document could not be parsed into the expected shape
    #[error("failed to parse {origin}: {source}")]
    Parse {
        /// URL or path the document came from
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The template engine rejected a context
    #[error("failed to render template {template}: {source}")]
    Render {
        /// Template file name
        template: &'static str,
        #[source]
        source: askama::Error,
    },

    /// Directory creation, read or write failure
    #[error("filesystem error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid options or ignore list
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl GenerateError {
    pub fn fetch(url: impl Into<String>, message: impl ToString) -> Self {
        GenerateError::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn parse(origin: impl Into<String>, source: serde_json::Error) -> Self {
        GenerateError::Parse {
            origin: origin.into(),
            source,
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GenerateError>;
