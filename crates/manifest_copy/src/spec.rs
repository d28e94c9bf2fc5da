//! Manifest copy options, outcome models, and top-level error types.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Mutually-exclusive bucket assigned to one unique filename per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCopyOutcome {
    /// Source copied to destination (or would have been, in dry-run).
    Copied,
    /// Filename absent from the source directory.
    NotFound,
    /// Destination file already present and overwrite disabled.
    AlreadyExists,
    /// Destination path rejected by the long-path policy.
    PathTooLong,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `copy_manifest`.
#[derive(Debug, Clone)]
pub struct SpecManifestCopyOptions {
    /// CSV header column holding the filenames.
    pub c_column: String,
    /// Replace existing destination files instead of skipping them.
    pub if_overwrite: bool,
    /// Suppress per-file stdout lines.
    pub if_quiet: bool,
    /// Classify and count without mutating the filesystem.
    pub if_dry_run: bool,
}

impl Default for SpecManifestCopyOptions {
    fn default() -> Self {
        Self {
            c_column: "filename".to_string(),
            if_overwrite: false,
            if_quiet: false,
            if_dry_run: false,
        }
    }
}

/// One processed filename with its assigned bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileOutcome {
    /// Filename exactly as read from the manifest column.
    pub name_file: String,
    /// Bucket assigned by the dispatcher.
    pub outcome: EnumCopyOutcome,
}

/// "Top-level call failed" errors (validation / extraction / fatal copy).
#[derive(Debug)]
pub enum CopyManifestError {
    /// Required manifest/source/target path does not exist.
    MissingPath(PathBuf),
    /// Configured column absent from the CSV header.
    ColumnNotFound(String),
    /// Manifest open or parse failure.
    CsvRead {
        /// Manifest path that failed to read.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Unclassified copy-primitive failure; terminates the run.
    CopyFailed {
        /// Destination path of the failed copy.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

impl fmt::Display for CopyManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPath(path) => {
                write!(f, "\"{}\" does not exist", path.display())
            }
            Self::ColumnNotFound(c_column) => {
                write!(f, "Column \"{c_column}\" does not exist")
            }
            Self::CsvRead { path, message } => {
                write!(f, "Failed to read manifest {}: {message}", path.display())
            }
            Self::CopyFailed { path, message } => {
                write!(f, "Failed to copy to {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for CopyManifestError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
