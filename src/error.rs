//! Errors surfaced by a conversion run

use crate::load::LoadError;
use crate::serialize::{SerializeError, SUPPORTED_FORMATS};
use crate::validate::Rejected;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a conversion run.
///
/// Invalid records only show up here under the abort policy; otherwise they
/// are reported through the gate and the run continues.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(
        "Unsupported output format: '{0}'. Please use one of the following: {}",
        SUPPORTED_FORMATS.join(", ")
    )]
    UnsupportedFormat(String),

    #[error("Invalid record in {0}")]
    Invalid(Box<Rejected>),

    #[error("Could not load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;
