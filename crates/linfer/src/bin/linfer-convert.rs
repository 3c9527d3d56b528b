//! linfer-convert - convert a model between the JSON and binary encodings.
//!
//! Usage:
//!   linfer-convert -i model.json -f json -o model.bin -t binary

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use linfer::app::{init_logging, run_convert, ConvertConfig, Verbosity};
use linfer::ModelFormat;

/// Re-encode a model file.
#[derive(Parser, Debug)]
#[command(name = "linfer-convert", version, about, long_about = None)]
struct Cli {
    /// Model to read
    #[arg(short = 'i', long, value_name = "FILE")]
    input: PathBuf,

    /// Encoding of the input
    #[arg(short = 'f', long, value_enum)]
    input_format: ModelFormat,

    /// Where to write the converted model
    #[arg(short = 'o', long, value_name = "FILE")]
    output: PathBuf,

    /// Encoding of the output
    #[arg(short = 't', long, value_enum)]
    output_format: ModelFormat,

    /// More diagnostics on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Fewer diagnostics on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,
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

    let config = ConvertConfig {
        input: cli.input,
        input_format: cli.input_format,
        output: cli.output,
        output_format: cli.output_format,
    };
    match run_convert(&config, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
