//! Error types for scanning, analysis and emission

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the linearizer pipeline.
///
/// Every variant is fatal to a run. Cyclic dependency graphs are not errors;
/// they are handled by the linearizer's fallback ordering.
#[derive(Error, Debug)]
pub enum Error {
    /// Directory walk failed (missing root, permission denied, ...)
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Source file could not be read or is not valid UTF-8
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A walked path did not live under the scan root
    #[error("Path {path} is not under root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// Two units were registered under the same path
    #[error("Duplicate source unit: {0}")]
    DuplicateUnit(PathBuf),

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Notebook serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
