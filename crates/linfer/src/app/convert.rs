//! Model conversion between persistence formats.

use std::io::Write;
use std::path::PathBuf;

use super::AppError;
use crate::persist::{self, ModelFormat};

/// Settings for [`run_convert`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub input_format: ModelFormat,
    pub output: PathBuf,
    pub output_format: ModelFormat,
}

/// Decode `input` and re-encode it to `output`, then write a one-line
/// summary to `out`.
///
/// Using the same format on both sides normalises a file (sorted JSON keys,
/// index-ordered binary tables).
pub fn run_convert<W: Write>(config: &ConvertConfig, out: &mut W) -> Result<(), AppError> {
    let model =
        persist::load(&config.input, config.input_format).map_err(|source| AppError::LoadModel {
            path: config.input.clone(),
            source,
        })?;
    persist::save(&model, &config.output, config.output_format).map_err(|source| {
        AppError::SaveModel {
            path: config.output.clone(),
            source,
        }
    })?;
    writeln!(
        out,
        "converted {} ({}) -> {} ({}): {} classes, {} columns",
        config.input.display(),
        config.input_format,
        config.output.display(),
        config.output_format,
        model.n_classes(),
        model.n_columns()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::ErrorKind;
    use crate::repr::LinearClassifier;
    use crate::testing::sample_classifier;

    #[test]
    fn json_to_binary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.json");
        let output = dir.path().join("model.bin");
        persist::save(&sample_classifier(), &input, ModelFormat::Json).unwrap();

        let config = ConvertConfig {
            input,
            input_format: ModelFormat::Json,
            output: output.clone(),
            output_format: ModelFormat::Binary,
        };
        let mut out = Vec::new();
        run_convert(&config, &mut out).unwrap();

        assert_eq!(LinearClassifier::load_binary(&output).unwrap(), sample_classifier());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("2 classes, 3 columns"), "{text}");
    }

    #[test]
    fn wrong_input_format_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.json");
        let output = dir.path().join("model.bin");
        persist::save(&sample_classifier(), &input, ModelFormat::Json).unwrap();

        let config = ConvertConfig {
            input,
            input_format: ModelFormat::Binary,
            output: output.clone(),
            output_format: ModelFormat::Json,
        };
        let err = run_convert(&config, &mut Vec::new()).unwrap_err();
        match err {
            AppError::LoadModel { source, .. } => assert_eq!(source.kind(), ErrorKind::Format),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!output.exists());
    }
}
