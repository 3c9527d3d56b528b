//! Model persistence.
//!
//! Two interchangeable formats decode into the same [`LinearClassifier`]:
//!
//! - **JSON** ([`ModelFormat::Json`]): self-describing text, see [`schema`].
//! - **Binary** ([`ModelFormat::Binary`]): big-endian, tag-delimited and
//!   version-gated, see [`binary`] for the layout.
//!
//! Decoding is all-or-nothing. A reader either returns a fully validated
//! model or a [`ReadError`]; nothing is cached between calls.
//!
//! # Example
//!
//! ```
//! use linfer::persist::{read_binary, write_binary};
//! use linfer::testing::sample_classifier;
//!
//! let model = sample_classifier();
//! let mut bytes = Vec::new();
//! write_binary(&model, &mut bytes).unwrap();
//! assert_eq!(read_binary(bytes.as_slice()).unwrap(), model);
//! ```

pub mod binary;
mod error;
mod json;
pub mod schema;

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

pub use binary::{read_binary, write_binary, MAGIC, VERSION_MAJOR, VERSION_MINOR};
pub use error::{ErrorKind, ReadError, WriteError};
pub use json::{read_json, write_json};
pub use schema::{FeaturesSchema, ModelSchema, WeightsSchema};

use crate::repr::LinearClassifier;

/// On-disk model encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum ModelFormat {
    Json,
    #[default]
    Binary,
}

impl ModelFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "binary",
        }
    }

    /// Decode a model in this format.
    pub fn read<R: Read>(self, reader: R) -> Result<LinearClassifier, ReadError> {
        match self {
            Self::Json => read_json(reader),
            Self::Binary => read_binary(reader),
        }
    }

    /// Encode a model in this format.
    pub fn write<W: Write>(self, model: &LinearClassifier, writer: W) -> Result<(), WriteError> {
        match self {
            Self::Json => write_json(model, writer),
            Self::Binary => write_binary(model, writer),
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised model format token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model format {0:?} (expected \"json\" or \"binary\")")]
pub struct ParseFormatError(pub String);

impl FromStr for ModelFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "binary" => Ok(Self::Binary),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}

// =============================================================================
// File helpers
// =============================================================================

/// Load a model from a file.
pub fn load(path: impl AsRef<Path>, format: ModelFormat) -> Result<LinearClassifier, ReadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let model = format.read(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        %format,
        n_classes = model.n_classes(),
        n_columns = model.n_columns(),
        "loaded model"
    );
    Ok(model)
}

/// Save a model to a file, replacing any existing content.
pub fn save(
    model: &LinearClassifier,
    path: impl AsRef<Path>,
    format: ModelFormat,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    format.write(model, BufWriter::new(file))?;
    tracing::info!(path = %path.display(), %format, "saved model");
    Ok(())
}

impl LinearClassifier {
    /// Decode from the JSON text format.
    pub fn read_json<R: Read>(reader: R) -> Result<Self, ReadError> {
        read_json(reader)
    }

    /// Decode from the binary format.
    pub fn read_binary<R: Read>(reader: R) -> Result<Self, ReadError> {
        read_binary(reader)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), WriteError> {
        write_json(self, writer)
    }

    pub fn write_binary<W: Write>(&self, writer: W) -> Result<(), WriteError> {
        write_binary(self, writer)
    }

    /// Load a JSON model file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        load(path, ModelFormat::Json)
    }

    /// Load a binary model file.
    pub fn load_binary(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        load(path, ModelFormat::Binary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{hashed_classifier, sample_classifier};

    #[test]
    fn format_tokens() {
        assert_eq!("json".parse::<ModelFormat>().unwrap(), ModelFormat::Json);
        assert_eq!("binary".parse::<ModelFormat>().unwrap(), ModelFormat::Binary);
        assert!("JSON".parse::<ModelFormat>().is_err());
        assert_eq!(ModelFormat::Binary.to_string(), "binary");
        assert_eq!(ModelFormat::default(), ModelFormat::Binary);
    }

    #[test]
    fn save_and_load_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        for format in [ModelFormat::Json, ModelFormat::Binary] {
            let model = hashed_classifier(6);
            let path = dir.path().join(format!("model.{format}"));
            save(&model, &path, format).unwrap();
            assert_eq!(load(&path, format).unwrap(), model);
        }
    }

    #[test]
    fn load_missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = LinearClassifier::load_binary(dir.path().join("absent.bin")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn json_model_read_as_binary_is_not_a_model() {
        let mut text = Vec::new();
        sample_classifier().write_json(&mut text).unwrap();
        let err = LinearClassifier::read_binary(text.as_slice()).unwrap_err();
        assert!(matches!(err, ReadError::NotAModel { .. }));
    }
}
