use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use workitems_validator::{DocumentKind, ItemValidator, load_json, normalize_patterns};

#[derive(Parser)]
#[command(name = "xtask", about = "workitems-validator workspace tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Check that a wrapper schema's outputSchema compiles as Draft 4 after pattern normalization
    CheckSchema { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::CheckSchema { file } => check_schema(&file),
    }
}

fn check_schema(path: &Path) -> Result<()> {
    let mut schema = load_json(path, DocumentKind::Schema)?;
    let rewritten = normalize_patterns(&mut schema);
    ItemValidator::from_wrapper(&schema).with_context(|| format!("compile {}", path.display()))?;
    println!("OK: {} ({} pattern fields normalized)", path.display(), rewritten);
    Ok(())
}
