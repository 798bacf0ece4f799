// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the outside world:
//
//   config.rs — reads the TOML config file and merges it with
//               CLI overrides into one validated PrepConfig
//
//   writer.rs — writes the eval/training prompt sets to disk as
//               pretty-printed UTF-8 JSON arrays
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling)

/// Config file loading and resolution
pub mod config;

/// JSON dataset output
pub mod writer;
