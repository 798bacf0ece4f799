// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every failure aborts the whole run; there is no partial
// success mode. Each variant names the file (and, where it
// applies, the segment) responsible so the user can fix the
// input and re-run.
//
//   Validation    → MissingTitle, MalformedSegments, InvalidSegment
//   Configuration → Config, Template
//   I/O           → Io, Serialize
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            thiserror crate documentation

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for the data layer
pub type PrepResult<T> = std::result::Result<T, PrepError>;

#[derive(Error, Debug)]
pub enum PrepError {
    /// A segment reached the packer without a title label
    #[error("missing title for segment at start_time {start_time} in '{}'", .file.display())]
    MissingTitle {
        file:       PathBuf,
        start_time: String,
    },

    /// The file is not a JSON array of segment objects
    #[error("malformed segment file '{}': {source}", .file.display())]
    MalformedSegments {
        file:   PathBuf,
        source: serde_json::Error,
    },

    /// The file parsed but a segment breaks an input invariant
    #[error("invalid segment #{index} in '{}': {message}", .file.display())]
    InvalidSegment {
        file:    PathBuf,
        index:   usize,
        message: String,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid prompt template: {0}")]
    Template(String),

    #[error("failed to encode JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PrepError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepError::Io { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_names_file_and_time() {
        let e = PrepError::MissingTitle {
            file:       PathBuf::from("videos/lecture1.json"),
            start_time: "12.5".to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("videos/lecture1.json"));
        assert!(msg.contains("12.5"));
    }
}
