// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the segmenter's JSON files and the list
// of prompts handed to the splitter.
//
// The pipeline flows in this order:
//
//   segment files (one JSON array per video)
//       │
//       ▼
//   JsonSegmentLoader → walks the tree, parses and validates
//       │
//       ▼
//   expand_video      → one or more packing passes per video
//       │                 (sliding windows + dedup)
//       ▼
//   Packer            → greedy, size-bounded runs of segments
//       │
//       ▼
//   Renderer          → fills the prompt template
//       │
//       ▼
//   CorpusBuilder     → all prompts of all videos
//       │
//       ▼
//   split_eval_train  → shuffled eval / training sets
//
// Each module is responsible for exactly one step and can be
// tested without touching the file system, except the loader.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Reads per-video segment arrays from a directory tree
pub mod loader;

/// Prompt template parsing and rendering
pub mod renderer;

/// Greedy packing of segments into prompts
pub mod packer;

/// Sliding-window re-packing with deduplication
pub mod window;

/// Gathers prompts from every video
pub mod corpus;

/// Shuffles and splits prompts into eval/training sets
pub mod splitter;
