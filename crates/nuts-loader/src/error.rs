//! Loader-specific error types.
//!
//! Structured errors for reading row sources and turning rows into
//! regions. Every variant carries the context needed to find the bad
//! input: sheet name and row number for record failures, file path for
//! I/O and parse failures.

use std::path::PathBuf;

use nuts_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading regions.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A complete row failed region validation.
    #[error("invalid row {row} in sheet {sheet:?}: {source}")]
    InvalidRow {
        sheet: String,
        row: usize,
        source: ValidationError,
    },

    /// The source has no sheet with the requested name.
    #[error("sheet not found: {sheet:?}")]
    SheetNotFound { sheet: String },

    /// A required file was not found.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// The workbook could not be opened or a sheet could not be read.
    #[error("failed to read spreadsheet {path}: {reason}")]
    Spreadsheet { path: PathBuf, reason: String },

    /// Invalid SHA-256 digest string.
    #[error("invalid SHA-256 digest: {digest:?} (expected 64 lowercase hex chars)")]
    InvalidDigest { digest: String },

    /// File contents do not match the pinned digest.
    #[error("digest mismatch for {path}: expected {expected}, got {actual}")]
    DigestMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Loader configuration is unusable.
    #[error("invalid loader config: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic serde_yaml error (not file-specific).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Read a file, mapping a missing file to [`LoadError::FileNotFound`].
pub(crate) fn read_file(path: &std::path::Path) -> LoadResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io(e)
        }
    })
}
