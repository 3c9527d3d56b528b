//! Command-line entry points shared by the binaries.
//!
//! Each tool builds an explicit configuration value once (see
//! [`PredictConfig`], [`ConvertConfig`]) and hands it to a `run_*` function
//! that writes its report to any [`std::io::Write`]. Nothing here reads the
//! process environment or arguments directly.

mod convert;
mod predict;

use std::path::PathBuf;
use std::process::ExitCode;

pub use convert::{run_convert, ConvertConfig};
pub use predict::{run_predict, PredictConfig, PredictSummary};

use crate::data::DatasetError;
use crate::persist::{ReadError, WriteError};

/// Failures reported by the command-line tools.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to load model {path}: {source}")]
    LoadModel {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("failed to write model {path}: {source}")]
    SaveModel {
        path: PathBuf,
        #[source]
        source: WriteError,
    },

    #[error("failed to read dataset {path}: {source}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: DatasetError,
    },

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl AppError {
    /// Every failure exits with status 1.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(1)
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Diagnostic output level for the tools.
///
/// Reports always go to stdout; this only controls `tracing` events on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// No output.
    Silent,
    /// Errors and warnings only.
    #[default]
    Warning,
    /// Model load/save summaries.
    Info,
    /// Per-section decoding details.
    Debug,
}

impl Verbosity {
    /// Level after applying `-v` and `--quiet` counts to the default.
    pub fn from_flags(verbose: u8, quiet: u8) -> Self {
        let level = (Self::default() as i16) + i16::from(verbose) - i16::from(quiet);
        match level {
            i16::MIN..=0 => Self::Silent,
            1 => Self::Warning,
            2 => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Default `EnvFilter` directive for this level.
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Silent => "off",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity` when set. Calling this more
/// than once keeps the first subscriber.
pub fn init_logging(verbosity: Verbosity) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, Verbosity::Warning)]
    #[case(1, 0, Verbosity::Info)]
    #[case(2, 0, Verbosity::Debug)]
    #[case(9, 0, Verbosity::Debug)]
    #[case(0, 1, Verbosity::Silent)]
    #[case(0, 5, Verbosity::Silent)]
    #[case(1, 1, Verbosity::Warning)]
    fn verbosity_from_flags(#[case] verbose: u8, #[case] quiet: u8, #[case] expected: Verbosity) {
        assert_eq!(Verbosity::from_flags(verbose, quiet), expected);
    }

    #[test]
    fn load_error_names_the_file() {
        let err = AppError::LoadModel {
            path: PathBuf::from("models/m.bin"),
            source: ReadError::NotAModel {
                expected: 1,
                actual: 2,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("models/m.bin"), "{msg}");
        assert!(msg.contains("magic number"), "{msg}");
    }
}
