//! Errors for dataset reading.

use std::io;
use std::num::ParseFloatError;

/// Errors that can occur when reading a dataset.
///
/// Any error aborts the whole read; no partial example list is returned.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("line {line}: invalid number {token:?}: {source}")]
    Number {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },
}
