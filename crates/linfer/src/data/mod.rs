//! Feature observations, examples and the plain-text dataset reader.
//!
//! - [`FeatureObservation`]: a named feature with a magnitude
//! - [`IntFeatureObservation`]: an indexed feature with a magnitude
//! - [`Example`]: observations plus a gold label and optional importance
//! - [`read_examples`]: parse `label[ importance] | feat[:val] ...` lines

mod error;
mod observation;
mod reader;

pub use error::DatasetError;
pub use observation::{Example, FeatureObservation, IntFeatureObservation};
pub use reader::{parse_line, read_examples, read_examples_file};
