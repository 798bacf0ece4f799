// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `generate` and `merge`, and all
// their flags.
//
// Every `generate` flag is optional: it either overrides the
// matching key of the --config file or supplies it when there
// is no file.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::domain::prompt::OutputFormat;
use crate::infra::config::ConfigFile;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack segment files into training (and eval) prompt datasets
    Generate(GenerateArgs),

    /// Merge one-file-per-segment output into a single sorted array
    Merge(MergeArgs),
}

/// Output layout selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    /// {"text": ...}
    #[value(alias = "full-text")]
    Full,

    /// {"instruction": ..., "input": "", "output": ...}
    #[value(alias = "instruction-pair")]
    Alpaca,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Full   => OutputFormat::Full,
            FormatArg::Alpaca => OutputFormat::Alpaca,
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// TOML file with any of the settings below
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Directory tree with one segment JSON array per video
    #[arg(long)]
    pub in_dir: Option<PathBuf>,

    /// Output JSON file for the training prompts
    #[arg(long)]
    pub out_file: Option<PathBuf>,

    /// Output JSON file for the eval prompts (required with --eval-split > 0)
    #[arg(long)]
    pub eval_out_file: Option<PathBuf>,

    /// Character budget per prompt; a lone oversized segment may exceed it
    #[arg(long)]
    pub max_prompt_length: Option<usize>,

    /// Fraction of prompts held out for evaluation, in [0, 1]
    #[arg(long)]
    pub eval_split: Option<f64>,

    /// Re-pack every video from offsets 0, step, 2*step, ...
    #[arg(long)]
    pub sliding_step: Option<usize>,

    /// Prompt template with {json_input} and {json_output} placeholders
    #[arg(long)]
    pub prompt: Option<String>,

    /// Output layout
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

/// The flags as a config layer; the application never sees clap types
impl From<GenerateArgs> for ConfigFile {
    fn from(a: GenerateArgs) -> Self {
        ConfigFile {
            in_dir:            a.in_dir,
            out_file:          a.out_file,
            eval_out_file:     a.eval_out_file,
            max_prompt_length: a.max_prompt_length,
            eval_split:        a.eval_split,
            sliding_step:      a.sliding_step,
            prompt:            a.prompt,
            format:            a.format.map(OutputFormat::from),
        }
    }
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Directory holding one JSON object per segment
    #[arg(long)]
    pub in_dir: PathBuf,

    /// Where to write the merged, sorted segment array
    #[arg(long)]
    pub out_file: PathBuf,
}
