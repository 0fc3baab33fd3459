//! Run-level error types.
//!
//! Every failure is fatal. Each variant names the file involved so the
//! diagnostic printed by the binary points the user at what to fix.

use std::path::PathBuf;

use crate::triplog::TripLogError;

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RulerError {
    /// Credential missing or rejected
    #[error("{message}")]
    Configuration { message: String },

    /// A required input file does not exist
    #[error("{} doesn't exist", path.display())]
    InputNotFound { path: PathBuf },

    /// A directory or cache file is not valid structured data
    #[error("{} is incorrect: {message}", path.display())]
    MalformedPersistedData { path: PathBuf, message: String },

    /// The trip log could not be resolved
    #[error("{}: {} error: {source}", path.display(), source.category())]
    Log { path: PathBuf, source: TripLogError },

    /// Reading an input failed for a reason other than absence
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing an output failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the report failed
    #[error("failed to write report {}: {source}", path.display())]
    Report { path: PathBuf, source: csv::Error },
}

impl RulerError {
    /// Map a failed read to `InputNotFound` or `Read`.
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            RulerError::InputNotFound { path }
        } else {
            RulerError::Read { path, source }
        }
    }
}
