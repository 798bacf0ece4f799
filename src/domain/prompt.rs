// ============================================================
// Layer 3 — Prompt Domain Type
// ============================================================
// A prompt is one training example: a contiguous run of
// segments from a single video rendered through the configured
// template. Two output shapes are supported:
//
//   full   → {"text": "<whole prompt incl. answer>"}
//   alpaca → {"instruction": "...", "input": "", "output": "..."}
//
// Prompt size is always measured in characters (Unicode scalar
// values), never bytes, and always through `char_len` so the
// packer and the renderer agree on what "too long" means.
//
// Reference: Rust Book §6 (Enums)
//            serde documentation (untagged enums)

use serde::{Deserialize, Serialize};

/// How prompts are laid out in the output files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Single text block with input and answer substituted
    #[serde(rename = "full", alias = "full-text")]
    Full,

    /// Instruction / input / output record
    #[serde(rename = "alpaca", alias = "instruction-pair")]
    Alpaca,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Full   => write!(f, "full"),
            OutputFormat::Alpaca => write!(f, "alpaca"),
        }
    }
}

/// One rendered training example.
///
/// Serialises untagged, so each variant becomes exactly the
/// JSON object the fine-tuning engine expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prompt {
    InstructionPair {
        instruction: String,
        input:       String,
        output:      String,
    },
    Full {
        text: String,
    },
}

impl Prompt {
    /// Size of this prompt in characters
    pub fn char_len(&self) -> usize {
        match self {
            Prompt::Full { text } => text.chars().count(),
            Prompt::InstructionPair { instruction, input, output } => {
                instruction.chars().count()
                    + input.chars().count()
                    + output.chars().count()
            }
        }
    }
}
