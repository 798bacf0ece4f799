// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing what the pipeline works on:
// segments read from the segmenter's output, the prompts we
// emit for fine-tuning, and the errors that abort a run.
//
// Rules for this layer:
//   - NO clap types
//   - NO file I/O
//   - Only structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One time-bounded slice of a lecture video
pub mod segment;

// A rendered training example and its output format
pub mod prompt;

// Immutable settings for one run
pub mod config;

// Named failures surfaced to the top level
pub mod error;

// Abstractions the data layer implements
pub mod traits;
