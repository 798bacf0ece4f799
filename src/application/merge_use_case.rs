// ============================================================
// Layer 2 — MergeUseCase
// ============================================================
// Some segmenter runs write one JSON file per segment:
//
//   lecture01/
//     0000.json   ← {"start_time": 0, "transcript": ..., ...}
//     0001.json   ← {"start_time": 14.2, ...}
//
// This use case folds such a directory back into the single
// sorted array per video that the generate command reads.
// Every field of each segment object is kept as-is.
//
// Reference: Rust Book §8 (Vectors, sorting)

use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::data::loader::walk_files;
use crate::data::renderer::to_pretty_json;
use crate::infra::writer::write_text;

pub struct MergeUseCase {
    in_dir:   PathBuf,
    out_file: PathBuf,
}

impl MergeUseCase {
    pub fn new(in_dir: impl Into<PathBuf>, out_file: impl Into<PathBuf>) -> Self {
        Self {
            in_dir:   in_dir.into(),
            out_file: out_file.into(),
        }
    }

    /// Merge all `*.json` segment files; returns how many were merged
    pub fn execute(&self) -> Result<usize> {
        let mut segments: Vec<(f64, Value)> = Vec::new();

        for path in walk_files(&self.in_dir)? {
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let text = fs::read_to_string(&path)
                .with_context(|| format!("Cannot read '{}'", path.display()))?;
            let value: Value = serde_json::from_str(&text)
                .with_context(|| format!("Malformed segment file '{}'", path.display()))?;

            let start = value
                .as_object()
                .and_then(|obj| obj.get("start_time"))
                .and_then(Value::as_f64)
                .ok_or_else(|| {
                    anyhow!("'{}' is not a segment object with a numeric start_time", path.display())
                })?;

            segments.push((start, value));
        }

        // Stable: equal start times keep file order
        segments.sort_by(|a, b| a.0.total_cmp(&b.0));

        let merged: Vec<Value> = segments.into_iter().map(|(_, v)| v).collect();
        write_text(&self.out_file, &to_pretty_json(&merged)?)?;

        tracing::info!(
            "Merged {} segments from '{}' into '{}'",
            merged.len(),
            self.in_dir.display(),
            self.out_file.display()
        );
        Ok(merged.len())
    }
}
