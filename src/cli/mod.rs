// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands the work to Layer 2.
//
// Two commands are supported:
//   1. `generate` — segment files → training/eval prompt JSON
//   2. `merge`    — per-segment files → one array per video
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, GenerateArgs, MergeArgs};

use crate::infra::config::ConfigFile;

#[derive(Parser, Debug)]
#[command(
    name = "segment-title-prep",
    version,
    about = "Pack lecture-video segments into fine-tuning prompts for segment titling."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args) => run_generate(args),
            Commands::Merge(args)    => run_merge(args),
        }
    }
}

/// Resolve settings (file, then flags), then run the pipeline.
fn run_generate(mut args: GenerateArgs) -> Result<()> {
    use crate::application::generate_use_case::GenerateUseCase;

    let base = match args.config.take() {
        Some(path) => ConfigFile::load(&path)?,
        None       => ConfigFile::default(),
    };
    let config = base
        .merge(args.into())
        .resolve()
        .context("Cannot start generation")?;

    tracing::info!("Reading segments from: {}", config.in_dir.display());

    let summary = GenerateUseCase::new(config).execute()?;

    println!(
        "Generated {} prompts ({} training, {} eval).",
        summary.total, summary.training, summary.eval
    );
    Ok(())
}

fn run_merge(args: MergeArgs) -> Result<()> {
    use crate::application::merge_use_case::MergeUseCase;

    let count = MergeUseCase::new(args.in_dir, args.out_file.clone()).execute()?;
    println!("Merged {} segments into {}", count, args.out_file.display());
    Ok(())
}
