// ============================================================
// Layer 3 — Resolved Run Configuration
// ============================================================
// The immutable settings of one run. Built once at startup
// (from a TOML file and/or CLI flags, see infra::config) and
// then passed by reference into every component. Nothing in
// the pipeline reads configuration from anywhere else.
//
// Reference: Rust Book §5 (Structs)

use std::path::PathBuf;

use crate::domain::error::{PrepError, PrepResult};
use crate::domain::prompt::OutputFormat;

#[derive(Debug, Clone)]
pub struct PrepConfig {
    /// Directory tree holding one segment JSON file per video
    pub in_dir: PathBuf,

    /// Where the training prompts are written
    pub out_file: PathBuf,

    /// Where the eval prompts are written; required iff eval_split > 0
    pub eval_out_file: Option<PathBuf>,

    /// Character budget for a multi-segment prompt
    pub max_prompt_length: usize,

    /// Fraction of the shuffled corpus held out for evaluation
    pub eval_split: Option<f64>,

    /// Offset step for sliding-window regeneration; None packs once
    pub sliding_step: Option<usize>,

    /// Template text with {json_input} / {json_output} placeholders
    pub prompt: String,

    pub format: OutputFormat,
}

impl PrepConfig {
    /// Check every invariant that does not need the file system.
    /// Runs before any input is read.
    pub fn validate(&self) -> PrepResult<()> {
        if self.max_prompt_length == 0 {
            return Err(PrepError::Config(
                "max_prompt_length must be a positive number of characters".to_string(),
            ));
        }

        if let Some(split) = self.eval_split {
            if !split.is_finite() || !(0.0..=1.0).contains(&split) {
                return Err(PrepError::Config(format!(
                    "eval_split must be within [0, 1], got {split}"
                )));
            }
        }

        if self.sliding_step == Some(0) {
            return Err(PrepError::Config(
                "sliding_step must be a positive integer".to_string(),
            ));
        }

        if self.wants_eval() && self.eval_out_file.is_none() {
            return Err(PrepError::Config(
                "eval_split is set but no eval_out_file was given".to_string(),
            ));
        }

        Ok(())
    }

    /// True when an eval set should be carved out of the corpus
    pub fn wants_eval(&self) -> bool {
        self.eval_split.map_or(false, |s| s > 0.0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A valid configuration tests can tweak field by field
    pub(crate) fn sample_config() -> PrepConfig {
        PrepConfig {
            in_dir:            PathBuf::from("segments"),
            out_file:          PathBuf::from("train.json"),
            eval_out_file:     None,
            max_prompt_length: 1000,
            eval_split:        None,
            sliding_step:      None,
            prompt:            "IN:{json_input}\nOUT:{json_output}".to_string(),
            format:            OutputFormat::Full,
        }
    }

    #[test]
    fn test_sample_is_valid() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_eval_split_needs_destination() {
        let mut cfg = sample_config();
        cfg.eval_split = Some(0.2);
        assert!(matches!(cfg.validate(), Err(PrepError::Config(_))));

        cfg.eval_out_file = Some(PathBuf::from("eval.json"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_eval_split_needs_no_destination() {
        let mut cfg = sample_config();
        cfg.eval_split = Some(0.0);
        assert!(cfg.validate().is_ok());
        assert!(!cfg.wants_eval());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut cfg = sample_config();
        cfg.eval_split = Some(1.5);
        assert!(cfg.validate().is_err());

        let mut cfg = sample_config();
        cfg.sliding_step = Some(0);
        assert!(cfg.validate().is_err());

        let mut cfg = sample_config();
        cfg.max_prompt_length = 0;
        assert!(cfg.validate().is_err());
    }
}
