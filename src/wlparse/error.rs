//! Hard failures surfaced to callers
//!
//! Only document-level and configuration-level problems live here. Anything that
//! can go wrong inside a single table (missing section, short rows, values that
//! are not numbers, extractor failures) is absorbed by the pipeline and never
//! reaches this type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for document reading, catalog loading and summary parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("document '{0}' is empty")]
    EmptyDocument(String),
    #[error("invalid target catalog: {0}")]
    Catalog(String),
    #[error("required column '{column}' not found in header")]
    MissingColumn { column: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ParseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ParseError::Io {
            path: path.into(),
            source,
        }
    }
}
