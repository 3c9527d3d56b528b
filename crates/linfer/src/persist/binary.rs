//! Tagged big-endian binary model format.
//!
//! # Layout
//!
//! ```text
//! Size    Field
//! ----    -----
//! i32     magic (0x6A48B9DD)
//! i16     major version (1)
//! i16     minor version (0)
//! i16     tag 100 (labels)
//!   i32   count, then count × (i32 len, len UTF-8 bytes, i32 index)
//! i16     tag 110 (feature map type)
//!   i16   1 = exact, 2 = hashed
//!   exact:  i16 tag 111, i32 count, count × (i32 len, len bytes); index = position
//!   hashed: i16 tag 112, i32 size
//! i16     tag 120 (weights type)
//!   i16   1 = dense (2 = sparse is reserved and rejected)
//! i16     tag 121 (weights values)
//!   i32   classes, then classes × (i32 n, n × f64)
//! ```
//!
//! Every magic, version and tag field must match exactly. Only version 1.0
//! is accepted. The writer emits labels in label-index order and exact
//! features in feature-index order, so re-encoding is byte-stable.

use std::collections::HashMap;
use std::io::{Read, Write};

use super::error::{ReadError, WriteError};
use crate::repr::{
    ClassifierIndexer, ExactFeatureMap, FeatureMap, HashedFeatureMap, LinearClassifier,
    ModelError,
};

// ============================================================================
// Constants
// ============================================================================

/// Magic number identifying a binary model.
pub const MAGIC: u32 = 0x6A48_B9DD;

/// Format version (major).
pub const VERSION_MAJOR: i16 = 1;

/// Format version (minor).
pub const VERSION_MINOR: i16 = 0;

/// Section tags.
pub mod tag {
    pub const LABELS: i16 = 100;
    pub const FEATURE_TYPE: i16 = 110;
    pub const EXACT_FEATURES: i16 = 111;
    pub const HASHED_SIZE: i16 = 112;
    pub const WEIGHTS_TYPE: i16 = 120;
    pub const WEIGHTS_VALUES: i16 = 121;
}

/// Feature map type codes.
pub mod feature_type {
    pub const EXACT: i16 = 1;
    pub const HASHED: i16 = 2;
}

/// Weights encoding codes.
pub mod weights_type {
    pub const DENSE: i16 = 1;
    /// Reserved; not implemented by any reader.
    pub const SPARSE: i16 = 2;
}

/// Upper bound on capacity reserved from untrusted counts.
const PREALLOC_LIMIT: usize = 1 << 16;

// ============================================================================
// Reader
// ============================================================================

/// Big-endian primitive reader that tracks the byte offset.
pub(crate) struct BinaryReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> BinaryReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        self.offset += N as u64;
        Ok(buf)
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16, ReadError> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, ReadError> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, ReadError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_f64(&mut self) -> Result<f64, ReadError> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    /// Read an `i16` that must equal `expected`.
    pub(crate) fn expect_i16(&mut self, field: &'static str, expected: i16) -> Result<(), ReadError> {
        let offset = self.offset;
        let actual = self.read_i16()?;
        if actual != expected {
            return Err(ReadError::UnexpectedValue {
                field,
                expected: expected.into(),
                actual: actual.into(),
                offset,
            });
        }
        Ok(())
    }

    /// Read a non-negative `i32` count or length.
    pub(crate) fn read_len(&mut self, what: &str) -> Result<usize, ReadError> {
        let offset = self.offset;
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| ReadError::Malformed {
            offset,
            message: format!("negative {what} {len}"),
        })
    }

    /// Read an `i32`-length-prefixed UTF-8 string.
    pub(crate) fn read_string(&mut self) -> Result<String, ReadError> {
        let len = self.read_len("string length")?;
        let offset = self.offset;
        let mut bytes = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        let read = (&mut self.inner).take(len as u64).read_to_end(&mut bytes)?;
        self.offset += read as u64;
        if read != len {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("string of {len} bytes truncated after {read}"),
            )
            .into());
        }
        String::from_utf8(bytes).map_err(|e| ReadError::Malformed {
            offset,
            message: format!("string is not valid UTF-8: {e}"),
        })
    }
}

/// Decode a model from the binary format.
pub fn read_binary<R: Read>(reader: R) -> Result<LinearClassifier, ReadError> {
    let mut r = BinaryReader::new(reader);

    let magic = r.read_u32()?;
    if magic != MAGIC {
        return Err(ReadError::NotAModel {
            expected: MAGIC,
            actual: magic,
        });
    }
    r.expect_i16("major version", VERSION_MAJOR)?;
    r.expect_i16("minor version", VERSION_MINOR)?;

    r.expect_i16("labels tag", tag::LABELS)?;
    let labels = read_label_table(&mut r)?;
    tracing::debug!(n_labels = labels.len(), "decoded labels");

    r.expect_i16("feature map tag", tag::FEATURE_TYPE)?;
    let feature_map = read_feature_map(&mut r)?;
    tracing::debug!(
        kind = %feature_map.kind(),
        space = feature_map.space_size(),
        "decoded feature map"
    );

    r.expect_i16("weights type tag", tag::WEIGHTS_TYPE)?;
    match r.read_i16()? {
        weights_type::DENSE => {}
        weights_type::SPARSE => {
            return Err(ReadError::config(
                "weights type",
                "sparse weights are not supported",
            ))
        }
        other => {
            return Err(ReadError::config(
                "weights type",
                format!("unknown weights type {other}"),
            ))
        }
    }
    r.expect_i16("weights values tag", tag::WEIGHTS_VALUES)?;
    let rows = read_dense_rows(&mut r)?;
    tracing::debug!(
        n_classes = rows.len(),
        n_columns = rows.first().map_or(0, Vec::len),
        "decoded weights"
    );

    let indexer = ClassifierIndexer::new(labels, feature_map)?;
    Ok(LinearClassifier::from_rows(indexer, rows)?)
}

fn read_label_table<R: Read>(r: &mut BinaryReader<R>) -> Result<HashMap<String, usize>, ReadError> {
    let count = r.read_len("label count")?;
    let mut labels = HashMap::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        let name = r.read_string()?;
        let index = r.read_len("label index")?;
        if labels.contains_key(&name) {
            return Err(ModelError::DuplicateName { what: "label", name }.into());
        }
        labels.insert(name, index);
    }
    Ok(labels)
}

fn read_feature_map<R: Read>(r: &mut BinaryReader<R>) -> Result<FeatureMap, ReadError> {
    match r.read_i16()? {
        feature_type::EXACT => {
            r.expect_i16("exact features tag", tag::EXACT_FEATURES)?;
            let count = r.read_len("feature count")?;
            let mut names = Vec::with_capacity(count.min(PREALLOC_LIMIT));
            for _ in 0..count {
                names.push(r.read_string()?);
            }
            Ok(ExactFeatureMap::from_names(names)?.into())
        }
        feature_type::HASHED => {
            r.expect_i16("hashed size tag", tag::HASHED_SIZE)?;
            let size = r.read_i32()?;
            if size <= 0 {
                return Err(ReadError::config(
                    "maxNumFeatures",
                    format!("hashed feature space size must be positive, got {size}"),
                ));
            }
            Ok(HashedFeatureMap::new(size.into())?.into())
        }
        other => Err(ReadError::config(
            "feature map type",
            format!(
                "unknown feature map type {other} (expected {} = exact or {} = hashed)",
                feature_type::EXACT,
                feature_type::HASHED
            ),
        )),
    }
}

fn read_dense_rows<R: Read>(r: &mut BinaryReader<R>) -> Result<Vec<Vec<f64>>, ReadError> {
    let n_classes = r.read_len("class count")?;
    let mut rows = Vec::with_capacity(n_classes.min(PREALLOC_LIMIT));
    for _ in 0..n_classes {
        let n_weights = r.read_len("weight count")?;
        let mut row = Vec::with_capacity(n_weights.min(PREALLOC_LIMIT));
        for _ in 0..n_weights {
            row.push(r.read_f64()?);
        }
        rows.push(row);
    }
    Ok(rows)
}

// ============================================================================
// Writer
// ============================================================================

/// Big-endian primitive writer.
pub(crate) struct BinaryWriter<W> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }

    pub(crate) fn write_i16(&mut self, v: i16) -> Result<(), WriteError> {
        Ok(self.inner.write_all(&v.to_be_bytes())?)
    }

    pub(crate) fn write_i32(&mut self, v: i32) -> Result<(), WriteError> {
        Ok(self.inner.write_all(&v.to_be_bytes())?)
    }

    pub(crate) fn write_u32(&mut self, v: u32) -> Result<(), WriteError> {
        Ok(self.inner.write_all(&v.to_be_bytes())?)
    }

    pub(crate) fn write_f64(&mut self, v: f64) -> Result<(), WriteError> {
        Ok(self.inner.write_all(&v.to_be_bytes())?)
    }

    pub(crate) fn write_len(&mut self, what: &'static str, len: usize) -> Result<(), WriteError> {
        let v = i32::try_from(len).map_err(|_| WriteError::TooLarge { what, len })?;
        self.write_i32(v)
    }

    pub(crate) fn write_string(&mut self, s: &str) -> Result<(), WriteError> {
        self.write_len("string length", s.len())?;
        Ok(self.inner.write_all(s.as_bytes())?)
    }

    pub(crate) fn flush(&mut self) -> Result<(), WriteError> {
        Ok(self.inner.flush()?)
    }
}

/// Encode a model in the binary format.
pub fn write_binary<W: Write>(model: &LinearClassifier, writer: W) -> Result<(), WriteError> {
    let mut w = BinaryWriter::new(writer);

    w.write_u32(MAGIC)?;
    w.write_i16(VERSION_MAJOR)?;
    w.write_i16(VERSION_MINOR)?;

    w.write_i16(tag::LABELS)?;
    let labels = model.labels();
    w.write_len("label count", labels.len())?;
    for (index, label) in labels.iter().enumerate() {
        w.write_string(label)?;
        w.write_len("label index", index)?;
    }

    w.write_i16(tag::FEATURE_TYPE)?;
    match model.feature_map() {
        FeatureMap::Exact(map) => {
            w.write_i16(feature_type::EXACT)?;
            w.write_i16(tag::EXACT_FEATURES)?;
            w.write_len("feature count", map.len())?;
            for name in map.names() {
                w.write_string(name)?;
            }
        }
        FeatureMap::Hashed(map) => {
            w.write_i16(feature_type::HASHED)?;
            w.write_i16(tag::HASHED_SIZE)?;
            w.write_len("hashed size", map.size())?;
        }
    }

    w.write_i16(tag::WEIGHTS_TYPE)?;
    w.write_i16(weights_type::DENSE)?;
    w.write_i16(tag::WEIGHTS_VALUES)?;
    w.write_len("class count", model.n_classes())?;
    for row in model.weights().rows() {
        w.write_len("weight count", row.len())?;
        for &value in row.iter() {
            w.write_f64(value)?;
        }
    }

    w.flush()
}
