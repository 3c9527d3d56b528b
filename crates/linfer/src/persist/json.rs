//! Text (JSON) model format.

use std::io::{Read, Write};

use super::error::{ReadError, WriteError};
use super::schema::ModelSchema;
use crate::repr::LinearClassifier;

/// Decode a model from a JSON document.
///
/// The document is parsed into [`ModelSchema`] first, then checked section
/// by section (`labels`, `features`, `weights`). The first problem found is
/// returned.
pub fn read_json<R: Read>(reader: R) -> Result<LinearClassifier, ReadError> {
    let schema: ModelSchema = serde_json::from_reader(reader)?;
    let model = LinearClassifier::try_from(schema)?;
    tracing::debug!(
        n_labels = model.n_classes(),
        kind = %model.feature_map().kind(),
        n_columns = model.n_columns(),
        "decoded JSON model"
    );
    Ok(model)
}

/// Encode a model as pretty-printed JSON followed by a newline.
///
/// Fails with [`WriteError::NonFinite`] before writing anything if a weight
/// is NaN or infinite.
pub fn write_json<W: Write>(model: &LinearClassifier, mut writer: W) -> Result<(), WriteError> {
    let schema = ModelSchema::try_from(model)?;
    serde_json::to_writer_pretty(&mut writer, &schema)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
