// ============================================================
// Layer 4 — Segment File Loader
// ============================================================
// Reads the segmenter's output: a directory tree where every
// file is one video, stored as a JSON array of segments sorted
// by start_time.
//
//   segments/
//     course-a/
//       lecture01.json   ← [ {start_time, transcript, ...}, ... ]
//       lecture02.json
//     course-b/
//       intro.json
//
// Files are visited in sorted path order so two runs over the
// same tree see the videos in the same order. Any unreadable or
// malformed file stops the run; nothing is skipped silently.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)
//            serde_json documentation

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::{PrepError, PrepResult};
use crate::domain::segment::Segment;
use crate::domain::traits::SegmentSource;

/// Loads per-video segment arrays from a directory tree.
/// Implements the SegmentSource trait from Layer 3.
pub struct JsonSegmentLoader {
    /// Root of the directory tree
    dir: PathBuf,
}

impl JsonSegmentLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SegmentSource for JsonSegmentLoader {
    fn videos(&self) -> PrepResult<Vec<PathBuf>> {
        let files = walk_files(&self.dir)?;
        tracing::info!(
            "Found {} segment files under '{}'",
            files.len(),
            self.dir.display()
        );
        Ok(files)
    }

    fn load(&self, video: &Path) -> PrepResult<Vec<Segment>> {
        let text = fs::read_to_string(video).map_err(|e| PrepError::io(video, e))?;

        let segments: Vec<Segment> = serde_json::from_str(&text).map_err(|e| {
            PrepError::MalformedSegments {
                file:   video.to_path_buf(),
                source: e,
            }
        })?;

        validate_segments(&segments, video)?;
        Ok(segments)
    }
}

/// Check the invariants the packer relies on: every start_time is
/// a non-negative number and they never go backwards.
pub fn validate_segments(segments: &[Segment], file: &Path) -> PrepResult<()> {
    let mut previous = 0.0_f64;

    for (index, seg) in segments.iter().enumerate() {
        let t = seg.start_seconds();

        if !t.is_finite() || t < 0.0 {
            return Err(PrepError::InvalidSegment {
                file: file.to_path_buf(),
                index,
                message: format!("start_time {} is not a non-negative number", seg.start_time),
            });
        }

        if t < previous {
            return Err(PrepError::InvalidSegment {
                file: file.to_path_buf(),
                index,
                message: format!(
                    "start_time {} comes after {}; segments must be sorted",
                    seg.start_time, previous
                ),
            });
        }

        previous = t;
    }

    Ok(())
}

/// Every non-directory entry below `dir`, recursively, in sorted order.
/// Symlinks to directories are reported and skipped, never descended into.
pub fn walk_files(dir: &Path) -> PrepResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PrepError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut files   = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current).map_err(|e| PrepError::io(&current, e))? {
            let entry = entry.map_err(|e| PrepError::io(&current, e))?;
            let path  = entry.path();

            // file_type() does not follow symlinks, so a link back to
            // an ancestor is never walked into
            let file_type = entry.file_type().map_err(|e| PrepError::io(&path, e))?;

            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_symlink() && path.is_dir() {
                tracing::warn!("Not following directory symlink '{}'", path.display());
            } else {
                // Anything else (including dangling links) is loaded
                // later and fails there with the path named
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
