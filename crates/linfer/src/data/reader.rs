//! Plain-text dataset reader.
//!
//! One instance per line:
//!
//! ```text
//! label[ importance] | feat[:val] feat[:val] ...
//! ```
//!
//! Exactly one `|` separates the label section from the features. A feature
//! without a value has magnitude 1.0. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{DatasetError, Example, FeatureObservation};

/// Read every instance from a buffered reader.
pub fn read_examples<R: BufRead>(reader: R) -> Result<Vec<Example>, DatasetError> {
    let mut examples = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        examples.push(parse_line(&line, i + 1)?);
    }
    tracing::debug!(n_examples = examples.len(), "read dataset");
    Ok(examples)
}

/// Read every instance from a file.
pub fn read_examples_file(path: impl AsRef<Path>) -> Result<Vec<Example>, DatasetError> {
    let file = File::open(path.as_ref())?;
    read_examples(BufReader::new(file))
}

/// Parse a single non-blank line. `line_no` is only used in error messages.
pub fn parse_line(line: &str, line_no: usize) -> Result<Example, DatasetError> {
    let format_err = |message: String| DatasetError::Format {
        line: line_no,
        message,
    };
    let parse_f64 = |token: &str| {
        token.parse::<f64>().map_err(|source| DatasetError::Number {
            line: line_no,
            token: token.to_string(),
            source,
        })
    };

    let (label_part, feature_part) = match line.split_once('|') {
        Some((l, f)) if !f.contains('|') => (l, f),
        _ => {
            return Err(format_err(
                "expected exactly one '|' separating label from features".into(),
            ))
        }
    };

    let label_tokens: Vec<&str> = label_part.split_whitespace().collect();
    let (label, importance) = match label_tokens.as_slice() {
        [label] => (*label, None),
        [label, importance] => (*label, Some(parse_f64(importance)?)),
        _ => {
            return Err(format_err(format!(
                "label section must be `label` or `label importance`, got {:?}",
                label_part.trim()
            )))
        }
    };

    let mut features = Vec::new();
    for token in feature_part.split_whitespace() {
        let mut parts = token.split(':');
        let name = parts.next().unwrap_or_default();
        let observation = match (parts.next(), parts.next()) {
            (None, _) => FeatureObservation::new(name, 1.0),
            (Some(value), None) => FeatureObservation::new(name, parse_f64(value)?),
            (Some(_), Some(_)) => {
                return Err(format_err(format!(
                    "at most one ':' allowed in feature {token:?}"
                )))
            }
        };
        features.push(observation);
    }

    Ok(Example {
        features,
        label: label.to_string(),
        importance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_and_features() {
        let ex = parse_line("pos | a b:2.5 c:-1", 1).unwrap();
        assert_eq!(ex.label, "pos");
        assert_eq!(ex.importance, None);
        assert_eq!(
            ex.features,
            vec![
                FeatureObservation::new("a", 1.0),
                FeatureObservation::new("b", 2.5),
                FeatureObservation::new("c", -1.0),
            ]
        );
    }

    #[test]
    fn parses_importance() {
        let ex = parse_line("neg 0.25 | x", 3).unwrap();
        assert_eq!(ex.label, "neg");
        assert_eq!(ex.importance, Some(0.25));
        assert_eq!(ex.features.len(), 1);
    }

    #[test]
    fn no_placeholder_entries() {
        // Features are appended as parsed, never pre-sized.
        let ex = parse_line("l | a b c", 1).unwrap();
        assert_eq!(ex.features.len(), 3);
        assert!(ex.features.iter().all(|f| !f.feature.is_empty()));
    }

    #[test]
    fn empty_feature_section_is_allowed() {
        let ex = parse_line("only_label |", 1).unwrap();
        assert!(ex.features.is_empty());
    }

    #[test]
    fn rejects_missing_pipe() {
        let err = parse_line("pos a b", 7).unwrap_err();
        assert!(matches!(err, DatasetError::Format { line: 7, .. }), "got: {err:?}");
    }

    #[test]
    fn rejects_two_pipes() {
        let err = parse_line("pos | a | b", 1).unwrap_err();
        assert!(matches!(err, DatasetError::Format { .. }));
    }

    #[test]
    fn rejects_too_many_label_tokens() {
        let err = parse_line("pos 1.0 extra | a", 1).unwrap_err();
        assert!(matches!(err, DatasetError::Format { .. }));
    }

    #[test]
    fn rejects_empty_label() {
        let err = parse_line(" | a", 1).unwrap_err();
        assert!(matches!(err, DatasetError::Format { .. }));
    }

    #[test]
    fn rejects_two_colons() {
        let err = parse_line("pos | a:1:2", 1).unwrap_err();
        assert!(matches!(err, DatasetError::Format { .. }));
    }

    #[test]
    fn rejects_bad_number() {
        let err = parse_line("pos | a:abc", 4).unwrap_err();
        match err {
            DatasetError::Number { line, token, .. } => {
                assert_eq!(line, 4);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_skips_blank_lines_and_fails_whole_read() {
        let ok = "a | x\n\n  \nb 2 | y:3\n";
        let examples = read_examples(ok.as_bytes()).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[1].importance, Some(2.0));

        let bad = "a | x\nb y\n";
        let err = read_examples(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Format { line: 2, .. }));
    }
}
