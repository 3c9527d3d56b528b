//! linfer-predict - score a dataset with a pretrained linear classifier.
//!
//! Usage:
//!   linfer-predict -m model.bin -p test.txt          # one line per instance
//!   linfer-predict -m model.json -f json -p test.txt -a -c
//!
//! Long flags take two dashes (`--model`, `--model-format`, `--predict`,
//! `--show-accuracy`, `--show-correct`); the single-letter forms `-m -f -p
//! -a -c` are unchanged. Every failure, including a usage error, exits with
//! status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use linfer::app::{init_logging, run_predict, PredictConfig, Verbosity};
use linfer::ModelFormat;

/// Predict labels for every instance of a dataset.
#[derive(Parser, Debug)]
#[command(name = "linfer-predict", version, about, long_about = None)]
struct Cli {
    /// Model file
    #[arg(short = 'm', long, value_name = "FILE")]
    model: PathBuf,

    /// Model encoding
    #[arg(short = 'f', long, value_enum, default_value_t = ModelFormat::Binary)]
    model_format: ModelFormat,

    /// Dataset to predict (`label[ importance] | feat[:val] ...` per line)
    #[arg(short = 'p', long, value_name = "FILE")]
    predict: PathBuf,

    /// Print the accuracy after all instances
    #[arg(short = 'a', long)]
    show_accuracy: bool,

    /// Mark each instance CORRECT or WRONG
    #[arg(short = 'c', long)]
    show_correct: bool,

    /// More diagnostics on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Fewer diagnostics on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,
}

impl From<Cli> for PredictConfig {
    fn from(cli: Cli) -> Self {
        Self {
            model: cli.model,
            model_format: cli.model_format,
            predict: cli.predict,
            show_accuracy: cli.show_accuracy,
            show_correct: cli.show_correct,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::from(1);
        }
        Err(e) => e.exit(),
    };
    init_logging(Verbosity::from_flags(cli.verbose, cli.quiet));

    let config = PredictConfig::from(cli);
    let stdout = std::io::stdout();
    match run_predict(&config, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
