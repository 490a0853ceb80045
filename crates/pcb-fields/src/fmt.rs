//! `fmt` command: parse and re-write a schematic

use anyhow::{Context, Result};
use clap::Args;
use pcb_legacy_sch::Schematic;
use std::path::PathBuf;

/// Arguments for the `fmt` command
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Path to a KiCad legacy schematic (.sch)
    #[arg(value_name = "SCHEMATIC", value_hint = clap::ValueHint::FilePath)]
    pub path: PathBuf,

    /// Output file path (defaults to stdout)
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Execute the `fmt` command
pub fn execute(args: FmtArgs) -> Result<()> {
    super::check_input(&args.path)?;

    let schematic = Schematic::parse(&args.path)?;
    let text = schematic
        .to_sch()
        .with_context(|| format!("Failed to write schematic: {}", args.path.display()))?;

    super::write_output(&text, args.output.as_deref())
}
