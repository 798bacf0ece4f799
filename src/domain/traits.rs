// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The corpus builder only needs two things from wherever the
// segments live: the list of videos, and the segments of one
// video. Keeping that behind a trait lets tests feed segments
// from memory while the CLI reads a directory of JSON files.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::{Path, PathBuf};

use crate::domain::error::PrepResult;
use crate::domain::segment::Segment;

// ─── SegmentSource ────────────────────────────────────────────────────────────
/// Any component that can supply per-video segment lists.
///
/// Implementations:
///   - JsonSegmentLoader → one JSON array file per video in a directory tree
pub trait SegmentSource {
    /// Identifiers of all videos, in the order they should be processed
    fn videos(&self) -> PrepResult<Vec<PathBuf>>;

    /// Load and validate the ordered segments of one video
    fn load(&self, video: &Path) -> PrepResult<Vec<Segment>>;
}
