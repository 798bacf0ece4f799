// ============================================================
// Layer 6 — Dataset Writer
// ============================================================
// Writes the eval and training prompt sets as JSON arrays:
//
//   [
//       {
//           "text": "..."
//       },
//       ...
//   ]
//
// UTF-8, 4-space indent, non-ASCII written as-is.
//
// Both sets are encoded in memory before any file is touched,
// so an encoding failure leaves no output behind. If writing the
// training file fails after the eval file was written, the eval
// file stays on disk; the error names the training path.
//
// Reference: Rust Book §12 (Writing to a File)
//            serde_json documentation

use std::{fs, path::Path};

use crate::data::renderer::to_pretty_json;
use crate::domain::error::{PrepError, PrepResult};
use crate::domain::prompt::Prompt;

/// Where one prompt set goes
pub struct OutputTarget<'a> {
    pub path:    &'a Path,
    pub prompts: &'a [Prompt],
}

/// Encode every target, then write eval (if any) followed by training.
pub fn write_datasets(
    training: OutputTarget<'_>,
    eval:     Option<OutputTarget<'_>>,
) -> PrepResult<()> {
    let training_json = to_pretty_json(training.prompts)?;
    let eval_json = match &eval {
        Some(target) => Some(to_pretty_json(target.prompts)?),
        None         => None,
    };

    if let (Some(target), Some(json)) = (&eval, &eval_json) {
        write_text(target.path, json)?;
        tracing::info!(
            "Wrote {} eval prompts to '{}'",
            target.prompts.len(),
            target.path.display()
        );
    }

    write_text(training.path, &training_json)?;
    tracing::info!(
        "Wrote {} training prompts to '{}'",
        training.prompts.len(),
        training.path.display()
    );

    Ok(())
}

/// Write `text` to `path`, creating parent directories first
pub fn write_text(path: &Path, text: &str) -> PrepResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PrepError::io(parent, e))?;
    }
    fs::write(path, text).map_err(|e| PrepError::io(path, e))
}
