use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;

mod apply;
mod fmt;

#[derive(Parser, Debug)]
#[command(name = "pcb-fields", version)]
#[command(about = "Fill in default component fields of KiCad legacy schematics")]
struct Cli {
    /// Print debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add default fields and generated footprints to every component
    Apply(apply::ApplyArgs),

    /// Rewrite a schematic in normalized form without changing any field
    Fmt(fmt::FmtArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Apply(args) => apply::execute(args),
        Commands::Fmt(args) => fmt::execute(args),
    }
}

/// Write `text` to `output`, or to stdout when no path is given
fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// Fail early with a readable message when the schematic path is wrong
fn check_input(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Path must be a schematic file: {}", path.display());
    }
    Ok(())
}
