//! `apply` command: fill in default fields and generated footprints

use anyhow::{Context, Result};
use clap::Args;
use pcb_legacy_sch::{fill_fields, RuleSet, Schematic};
use std::path::PathBuf;

/// Arguments for the `apply` command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Path to a KiCad legacy schematic (.sch)
    #[arg(value_name = "SCHEMATIC", value_hint = clap::ValueHint::FilePath)]
    pub path: PathBuf,

    /// Rule set file (YAML, or JSON with a .json extension). Defaults to the bundled rules
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub rules: Option<PathBuf>,

    /// Output file path (defaults to stdout)
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Execute the `apply` command
pub fn execute(args: ApplyArgs) -> Result<()> {
    super::check_input(&args.path)?;

    let rules = match &args.rules {
        Some(path) => {
            log::info!("Using rule set {}", path.display());
            RuleSet::load(path)?
        }
        None => RuleSet::bundled().context("Failed to load bundled rule set")?,
    };

    eprintln!("Parsing schematic: {}", args.path.display());
    let mut schematic = Schematic::parse(&args.path)?;

    let total = schematic.components.len();
    let pseudo = schematic.components.iter().filter(|c| c.is_pseudo()).count();
    eprintln!("  Found {} components ({} power symbols skipped)", total, pseudo);

    fill_fields(&mut schematic, &rules);

    let text = schematic
        .to_sch()
        .with_context(|| format!("Failed to write schematic: {}", args.path.display()))?;

    super::write_output(&text, args.output.as_deref())
}
