//! Read and write errors for model persistence.

use std::io;

use crate::repr::ModelError;

/// Broad category of a [`ReadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed document or stream.
    Format,
    /// Well-formed, but names an unknown or unsupported configuration.
    Configuration,
    /// The underlying transport failed.
    Io,
}

/// Errors that can occur while decoding a model.
///
/// Decoding stops at the first problem; no partial model is returned.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// I/O error, including `UnexpectedEof` on truncated input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Binary stream does not start with the model magic number.
    #[error("not a linfer model: expected magic number {expected:#010x} but saw {actual:#010x}")]
    NotAModel { expected: u32, actual: u32 },

    /// A version or tag field did not match.
    #[error("invalid binary format at byte {offset}: expected {field} {expected} but saw {actual}")]
    UnexpectedValue {
        field: &'static str,
        expected: i64,
        actual: i64,
        offset: u64,
    },

    /// Binary stream is structurally invalid (negative length, bad UTF-8, ...).
    #[error("invalid binary format at byte {offset}: {message}")]
    Malformed { offset: u64, message: String },

    /// Text document is not valid JSON or has the wrong shape.
    #[error("invalid JSON model: {0}")]
    Json(serde_json::Error),

    /// Text document is valid JSON but misses a required field.
    #[error("invalid JSON model: {0}")]
    Schema(String),

    /// Unknown feature-map type, non-positive hashed size or unsupported weights.
    #[error("invalid model configuration in `{field}`: {message}")]
    Config { field: &'static str, message: String },

    /// Decoded parts violate a model invariant.
    #[error("invalid model: {0}")]
    Invalid(#[from] ModelError),
}

impl ReadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Config { .. } => ErrorKind::Configuration,
            Self::NotAModel { .. }
            | Self::UnexpectedValue { .. }
            | Self::Malformed { .. }
            | Self::Json(_)
            | Self::Schema(_)
            | Self::Invalid(_) => ErrorKind::Format,
        }
    }

    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            field,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ReadError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Self::Io(e.into())
        } else {
            Self::Json(e)
        }
    }
}

/// Errors that can occur while encoding a model.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON has no representation for NaN or infinities.
    #[error("weight [{class}][{column}] is {value}, which the text format cannot represent")]
    NonFinite {
        class: usize,
        column: usize,
        value: f64,
    },

    /// A count or length does not fit the format's signed 32-bit field.
    #[error("{what} {len} exceeds the format limit of {}", i32::MAX)]
    TooLarge { what: &'static str, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let io = ReadError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert_eq!(io.kind(), ErrorKind::Io);
        assert_eq!(ReadError::config("weights.type", "sparse").kind(), ErrorKind::Configuration);
        assert_eq!(
            ReadError::NotAModel {
                expected: 1,
                actual: 2
            }
            .kind(),
            ErrorKind::Format
        );
        assert_eq!(ReadError::Invalid(ModelError::NoLabels).kind(), ErrorKind::Format);
    }

    #[test]
    fn magic_message_names_both_values() {
        let err = ReadError::NotAModel {
            expected: 0x6A48_B9DD,
            actual: 0xDEAD_BEEF,
        };
        let msg = err.to_string();
        assert!(msg.contains("0x6a48b9dd"), "{msg}");
        assert!(msg.contains("0xdeadbeef"), "{msg}");
    }

    #[test]
    fn json_io_errors_become_io() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }
        let e = serde_json::from_reader::<_, serde_json::Value>(Failing).unwrap_err();
        assert_eq!(ReadError::from(e).kind(), ErrorKind::Io);
    }
}
