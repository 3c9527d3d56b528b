//! Feature maps: feature name to weight-matrix column.
//!
//! The set of variants is closed. The binary format enumerates exactly these
//! two, so adding one is a format change.

use std::collections::HashMap;
use std::fmt;

use super::dictionary::{index_names, invert_dense};
use super::hash::murmur3_32;
use super::ModelError;

/// Which feature-map variant a model uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureMapKind {
    Exact,
    Hashed,
}

impl FeatureMapKind {
    /// Name used by the text format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Hashed => "hashed",
        }
    }
}

impl fmt::Display for FeatureMapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Exact
// =============================================================================

/// Dictionary-backed feature map with dense indices `0..n`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactFeatureMap {
    index: HashMap<String, usize>,
    /// Names ordered by index.
    names: Vec<String>,
}

impl ExactFeatureMap {
    /// Build from a name -> index dictionary.
    ///
    /// Indices must be exactly `0..n`, each used once.
    pub fn new(dictionary: HashMap<String, usize>) -> Result<Self, ModelError> {
        let names = invert_dense(dictionary.iter().map(|(k, &v)| (k.clone(), v)), "feature")?;
        Ok(Self {
            index: dictionary,
            names,
        })
    }

    /// Build from names in index order (the binary layout).
    pub fn from_names(names: Vec<String>) -> Result<Self, ModelError> {
        let index = index_names(&names, "feature")?;
        Ok(Self { index, names })
    }

    /// Column of `name`, or `None` when it is not in the dictionary.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Feature names ordered by index.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate `(name, index)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.names.iter().enumerate().map(|(i, n)| (n.as_str(), i))
    }
}

// =============================================================================
// Hashed
// =============================================================================

/// Fixed-size hashed feature space.
///
/// Every name maps into `0..size`; collisions are expected and their
/// magnitudes simply add up during condensing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashedFeatureMap {
    size: u32,
}

impl HashedFeatureMap {
    /// Largest supported space; the reduction is done in signed 32-bit.
    pub const MAX_SIZE: u32 = i32::MAX as u32;

    pub fn new(size: i64) -> Result<Self, ModelError> {
        if size <= 0 || size > i64::from(Self::MAX_SIZE) {
            return Err(ModelError::InvalidHashSize {
                size,
                max: i64::from(Self::MAX_SIZE),
            });
        }
        Ok(Self { size: size as u32 })
    }

    /// Number of columns in the hashed space.
    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Column of `name`; always in `0..size`.
    #[inline]
    pub fn index_of(&self, name: &str) -> usize {
        // Reduce the hash as a signed 32-bit value.
        let hash = murmur3_32(name.as_bytes(), 0) as i32;
        hash.rem_euclid(self.size as i32) as usize
    }
}

// =============================================================================
// FeatureMap
// =============================================================================

/// Feature name to column mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureMap {
    Exact(ExactFeatureMap),
    Hashed(HashedFeatureMap),
}

impl FeatureMap {
    /// Column of `name`. Only the exact variant can report `None`.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        match self {
            Self::Exact(map) => map.index_of(name),
            Self::Hashed(map) => Some(map.index_of(name)),
        }
    }

    /// Number of distinct columns the map can produce.
    pub fn space_size(&self) -> usize {
        match self {
            Self::Exact(map) => map.len(),
            Self::Hashed(map) => map.size(),
        }
    }

    pub fn kind(&self) -> FeatureMapKind {
        match self {
            Self::Exact(_) => FeatureMapKind::Exact,
            Self::Hashed(_) => FeatureMapKind::Hashed,
        }
    }
}

impl From<ExactFeatureMap> for FeatureMap {
    fn from(map: ExactFeatureMap) -> Self {
        Self::Exact(map)
    }
}

impl From<HashedFeatureMap> for FeatureMap {
    fn from(map: HashedFeatureMap) -> Self {
        Self::Hashed(map)
    }
}
