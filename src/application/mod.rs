// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one command.
//
// Rules for this layer:
//   - No packing or rendering logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Segment files → packed, split, written prompt datasets
pub mod generate_use_case;

// Per-segment files → one sorted segment array per video
pub mod merge_use_case;
