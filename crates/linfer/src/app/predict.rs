//! Batch prediction over a dataset file.

use std::io::Write;
use std::path::PathBuf;

use super::AppError;
use crate::data::{read_examples_file, Example};
use crate::persist::{self, ModelFormat};
use crate::repr::LinearClassifier;

/// Settings for [`run_predict`].
#[derive(Debug, Clone, PartialEq)]
pub struct PredictConfig {
    /// Model file.
    pub model: PathBuf,
    pub model_format: ModelFormat,
    /// Dataset of `label[ importance] | feat[:val] ...` lines.
    pub predict: PathBuf,
    /// Append an `Accuracy: NN.NN%` line.
    pub show_accuracy: bool,
    /// Insert ` CORRECT` or ` WRONG` after each instance number.
    pub show_correct: bool,
}

/// Counts gathered while reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PredictSummary {
    pub instances: usize,
    pub correct: usize,
}

impl PredictSummary {
    /// Percentage of correct predictions, `None` for an empty dataset.
    pub fn accuracy(&self) -> Option<f64> {
        (self.instances > 0).then(|| self.correct as f64 * 100.0 / self.instances as f64)
    }
}

/// Load the model and dataset, then write one line per instance to `out`:
///
/// ```text
/// 1 pos pos
/// 2 WRONG neg pos      (with show_correct)
/// Accuracy: 50.00%     (with show_accuracy)
/// ```
pub fn run_predict<W: Write>(config: &PredictConfig, out: &mut W) -> Result<PredictSummary, AppError> {
    let model =
        persist::load(&config.model, config.model_format).map_err(|source| AppError::LoadModel {
            path: config.model.clone(),
            source,
        })?;
    let examples = read_examples_file(&config.predict).map_err(|source| AppError::Dataset {
        path: config.predict.clone(),
        source,
    })?;
    tracing::info!(instances = examples.len(), path = %config.predict.display(), "read dataset");

    report(&model, &examples, config, out)
}

fn report<W: Write>(
    model: &LinearClassifier,
    examples: &[Example],
    config: &PredictConfig,
    out: &mut W,
) -> Result<PredictSummary, AppError> {
    let mut summary = PredictSummary::default();
    for (i, example) in examples.iter().enumerate() {
        let prediction = model.predict(&example.features);
        let is_correct = prediction.label == example.label;
        let marker = match (config.show_correct, is_correct) {
            (false, _) => "",
            (true, true) => " CORRECT",
            (true, false) => " WRONG",
        };
        writeln!(out, "{}{marker} {} {}", i + 1, example.label, prediction.label)?;

        summary.instances += 1;
        if is_correct {
            summary.correct += 1;
        }
    }

    if config.show_accuracy {
        let accuracy = summary.accuracy().unwrap_or_else(|| {
            tracing::warn!("dataset has no instances; reporting zero accuracy");
            0.0
        });
        writeln!(out, "Accuracy: {accuracy:.2}%")?;
    }
    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{observations, sample_classifier};

    fn config(show_accuracy: bool, show_correct: bool) -> PredictConfig {
        PredictConfig {
            model: PathBuf::from("unused"),
            model_format: ModelFormat::Json,
            predict: PathBuf::from("unused"),
            show_accuracy,
            show_correct,
        }
    }

    fn examples() -> Vec<Example> {
        vec![
            Example::new("pos", observations("a")),
            Example::new("pos", observations("b:-10")),
        ]
    }

    fn render(cfg: &PredictConfig, examples: &[Example]) -> (String, PredictSummary) {
        let mut out = Vec::new();
        let summary = report(&sample_classifier(), examples, cfg, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn plain_lines() {
        let (text, summary) = render(&config(false, false), &examples());
        assert_eq!(text, "1 pos pos\n2 pos neg\n");
        assert_eq!(summary, PredictSummary { instances: 2, correct: 1 });
    }

    #[test]
    fn correctness_and_accuracy() {
        let (text, _) = render(&config(true, true), &examples());
        assert_eq!(text, "1 CORRECT pos pos\n2 WRONG pos neg\nAccuracy: 50.00%\n");
    }

    #[test]
    fn empty_dataset_reports_zero() {
        let (text, summary) = render(&config(true, false), &[]);
        assert_eq!(text, "Accuracy: 0.00%\n");
        assert_eq!(summary.accuracy(), None);
    }
}
