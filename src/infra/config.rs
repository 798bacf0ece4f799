// ============================================================
// Layer 6 — Configuration Loading
// ============================================================
// Settings can come from a TOML file, from CLI flags, or both.
// CLI flags win over the file. Every key is optional at this
// stage; `resolve` checks that the required ones are present
// and produces the immutable PrepConfig used for the run.
//
// Example prep.toml:
//
//   in_dir            = "data/segments"
//   out_file          = "data/train.json"
//   eval_out_file     = "data/eval.json"
//   max_prompt_length = 8000
//   eval_split        = 0.1
//   sliding_step      = 3
//   format            = "alpaca"
//   prompt            = """
//   Give each snippet a title. Input:
//   {json_input}
//   """
//
// Unknown keys are rejected so a typo never silently falls back
// to a default.
//
// Reference: toml crate documentation
//            serde documentation (Option fields, deny_unknown_fields)

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::domain::config::PrepConfig;
use crate::domain::error::{PrepError, PrepResult};
use crate::domain::prompt::OutputFormat;

/// Partially specified settings from one source (file or flags)
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub in_dir:            Option<PathBuf>,
    pub out_file:          Option<PathBuf>,
    pub eval_out_file:     Option<PathBuf>,
    pub max_prompt_length: Option<usize>,
    pub eval_split:        Option<f64>,
    pub sliding_step:      Option<usize>,
    pub prompt:            Option<String>,
    pub format:            Option<OutputFormat>,
}

impl ConfigFile {
    /// Read settings from a TOML document on disk
    pub fn load(path: &Path) -> PrepResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| PrepError::io(path, e))?;
        let file = Self::parse(&text)
            .map_err(|e| PrepError::Config(format!("'{}': {e}", path.display())))?;
        tracing::debug!("Loaded configuration from '{}'", path.display());
        Ok(file)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            in_dir:            overrides.in_dir.or(self.in_dir),
            out_file:          overrides.out_file.or(self.out_file),
            eval_out_file:     overrides.eval_out_file.or(self.eval_out_file),
            max_prompt_length: overrides.max_prompt_length.or(self.max_prompt_length),
            eval_split:        overrides.eval_split.or(self.eval_split),
            sliding_step:      overrides.sliding_step.or(self.sliding_step),
            prompt:            overrides.prompt.or(self.prompt),
            format:            overrides.format.or(self.format),
        }
    }

    /// Fill in defaults, require the mandatory keys, and validate
    pub fn resolve(self) -> PrepResult<PrepConfig> {
        let config = PrepConfig {
            in_dir:            required(self.in_dir, "in_dir")?,
            out_file:          required(self.out_file, "out_file")?,
            eval_out_file:     self.eval_out_file,
            max_prompt_length: required(self.max_prompt_length, "max_prompt_length")?,
            eval_split:        self.eval_split,
            sliding_step:      self.sliding_step,
            prompt:            required(self.prompt, "prompt")?,
            format:            self.format.unwrap_or(OutputFormat::Full),
        };

        config.validate()?;
        Ok(config)
    }
}

fn required<T>(value: Option<T>, key: &str) -> PrepResult<T> {
    value.ok_or_else(|| {
        PrepError::Config(format!(
            "missing required setting '{key}' (set it in the config file or pass --{})",
            key.replace('_', "-")
        ))
    })
}
