// workitems-validator/src/main.rs

use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::debug;

use workitems_validator::{Report, pipeline, usage};

#[derive(Parser)]
#[command(
    name = "workitems-validator",
    about = "Validate 'workitems' against a Draft 4 output schema",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Wrapper schema holding outputDataDefinition.outputSchema
    #[arg(allow_hyphen_values = true)]
    schema_file: PathBuf,
    /// JSON document with a top-level 'workitems' array
    #[arg(allow_hyphen_values = true)]
    data_file: PathBuf,
}

fn usage_error() -> ExitCode {
    println!("{}", Report::failure(usage()).to_json_line());
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    // stdout carries exactly one JSON line; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    // exactly two raw arguments; `--` and flags count like any other
    let argc = std::env::args_os().len().saturating_sub(1);
    if argc != 2 {
        debug!(argc, "wrong argument count");
        return usage_error();
    }
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            debug!(kind = ?e.kind(), "bad arguments");
            return usage_error();
        }
    };

    match pipeline::run(&args.schema_file, &args.data_file) {
        Ok(report) => {
            for line in report.diagnostics() {
                eprintln!("{line}");
            }
            println!("{}", report.to_json_line());
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(error = ?err, "validation aborted");
            println!("{}", Report::failure(format!("Validation error: {err}")).to_json_line());
            ExitCode::FAILURE
        }
    }
}
