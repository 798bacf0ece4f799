// ============================================================
// Layer 2 — GenerateUseCase
// ============================================================
// Orchestrates one dataset-generation run in order:
//
//   Step 1: Validate config + parse template   (Layer 3/4)
//   Step 2: Load, pack, and window every video (Layer 4 - data)
//   Step 3: Shuffle and split eval/training    (Layer 4 - data)
//   Step 4: Write the output files             (Layer 6 - infra)
//
// All configuration problems surface in step 1, before any
// input file is opened.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};

use crate::data::{
    corpus::CorpusBuilder,
    loader::JsonSegmentLoader,
    renderer::Renderer,
    splitter::split_eval_train,
};
use crate::domain::config::PrepConfig;
use crate::infra::writer::{write_datasets, OutputTarget};

/// Counts reported back to the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    pub total:    usize,
    pub training: usize,
    pub eval:     usize,
}

// ─── GenerateUseCase ──────────────────────────────────────────────────────────
pub struct GenerateUseCase {
    config: PrepConfig,
}

impl GenerateUseCase {
    pub fn new(config: PrepConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<GenerateSummary> {
        let cfg = &self.config;

        // ── Step 1: Fail fast on bad settings ────────────────────────────────
        cfg.validate().context("Configuration rejected")?;
        let renderer = Renderer::from_config(cfg).context("Prompt template rejected")?;

        tracing::info!(
            "Packing prompts of at most {} chars ({} format, sliding step {})",
            cfg.max_prompt_length,
            cfg.format,
            cfg.sliding_step.map_or_else(|| "off".to_string(), |s| s.to_string()),
        );

        // ── Step 2: Build the corpus ──────────────────────────────────────────
        let loader = JsonSegmentLoader::new(&cfg.in_dir);
        let corpus = CorpusBuilder::new(&loader, &renderer, cfg)
            .build()
            .with_context(|| format!("Failed to build corpus from '{}'", cfg.in_dir.display()))?;
        let total = corpus.len();

        // ── Step 3: Shuffle and split ─────────────────────────────────────────
        let mut rng = rand::thread_rng();
        let split   = if cfg.wants_eval() { cfg.eval_split } else { None };
        let (eval, training) = split_eval_train(corpus, split, &mut rng);
        tracing::info!("Split: {} training, {} eval", training.len(), eval.len());

        // ── Step 4: Write outputs ─────────────────────────────────────────────
        let eval_target = match (&cfg.eval_out_file, split) {
            (Some(path), Some(_)) => Some(OutputTarget { path: path.as_path(), prompts: &eval }),
            _ => None,
        };
        write_datasets(
            OutputTarget { path: &cfg.out_file, prompts: &training },
            eval_target,
        )
        .context("Failed to write datasets")?;

        Ok(GenerateSummary {
            total,
            training: training.len(),
            eval:     eval.len(),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    use crate::domain::prompt::{OutputFormat, Prompt};

    fn write_video(dir: &Path, name: &str, count: u64) {
        let segs: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "start_time":  i * 30,
                    "transcript":  format!("part {i} of {name}"),
                    "screen_text": "Folie",
                    "title":       format!("Kapitel {}", i / 2),
                })
            })
            .collect();
        fs::write(dir.join(name), serde_json::to_string(&segs).unwrap()).unwrap();
    }

    fn config(root: &Path) -> PrepConfig {
        PrepConfig {
            in_dir:            root.join("segments"),
            out_file:          root.join("out").join("train.json"),
            eval_out_file:     Some(root.join("out").join("eval.json")),
            max_prompt_length: 400,
            eval_split:        Some(0.5),
            sliding_step:      None,
            prompt:            "### Input\n{json_input}\n### Output\n{json_output}".to_string(),
            format:            OutputFormat::Full,
        }
    }

    #[test]
    fn test_end_to_end_full_format() {
        let root = tempdir().unwrap();
        let seg_dir = root.path().join("segments");
        fs::create_dir_all(seg_dir.join("course")).unwrap();
        write_video(&seg_dir, "a.json", 5);
        write_video(&seg_dir.join("course"), "b.json", 3);

        let cfg     = config(root.path());
        let summary = GenerateUseCase::new(cfg.clone()).execute().unwrap();

        assert!(summary.total >= 2);
        assert_eq!(summary.eval, (summary.total + 1) / 2);
        assert_eq!(summary.eval + summary.training, summary.total);

        let train: Vec<Prompt> =
            serde_json::from_str(&fs::read_to_string(&cfg.out_file).unwrap()).unwrap();
        let eval: Vec<Prompt> =
            serde_json::from_str(&fs::read_to_string(cfg.eval_out_file.unwrap()).unwrap()).unwrap();
        assert_eq!(train.len(), summary.training);
        assert_eq!(eval.len(), summary.eval);
        assert!(train.iter().chain(eval.iter()).all(|p| matches!(p, Prompt::Full { .. })));
    }

    #[test]
    fn test_alpaca_without_split_writes_only_training() {
        let root = tempdir().unwrap();
        let seg_dir = root.path().join("segments");
        fs::create_dir_all(&seg_dir).unwrap();
        write_video(&seg_dir, "a.json", 4);

        let mut cfg = config(root.path());
        cfg.format       = OutputFormat::Alpaca;
        cfg.prompt       = "Title these:\n{json_input}".to_string();
        cfg.eval_split   = None;
        cfg.sliding_step = Some(1);

        let summary = GenerateUseCase::new(cfg.clone()).execute().unwrap();
        assert_eq!(summary.eval, 0);
        assert!(!cfg.eval_out_file.unwrap().exists());

        let train: Vec<Prompt> =
            serde_json::from_str(&fs::read_to_string(&cfg.out_file).unwrap()).unwrap();
        assert_eq!(train.len(), summary.total);
        for p in &train {
            match p {
                Prompt::InstructionPair { input, output, .. } => {
                    assert!(input.is_empty());
                    assert!(output.starts_with('{'));
                }
                other => panic!("expected instruction pair, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_title_leaves_no_output() {
        let root = tempdir().unwrap();
        let seg_dir = root.path().join("segments");
        fs::create_dir_all(&seg_dir).unwrap();
        fs::write(
            seg_dir.join("bad.json"),
            r#"[{"start_time": 0, "transcript": "", "screen_text": ""}]"#,
        )
        .unwrap();

        let cfg = config(root.path());
        let err = GenerateUseCase::new(cfg.clone()).execute().unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
        assert!(!cfg.out_file.exists());
    }

    #[test]
    fn test_bad_template_fails_before_reading_input() {
        let root    = tempdir().unwrap();
        let mut cfg = config(root.path());
        cfg.prompt  = "{unknown}".to_string();

        // in_dir does not exist; the template error must win
        let err = GenerateUseCase::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("template"));
    }
}
