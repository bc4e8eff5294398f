use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("Failed to create lock directory {path}: {source}")]
    CreateDirFailed { path: PathBuf, source: io::Error },

    #[error("Failed to open lock file {path}: {source}")]
    OpenFailed { path: PathBuf, source: io::Error },

    #[error("Failed to acquire lock on {path}: {source}")]
    AcquireFailed { path: PathBuf, source: io::Error },

    #[error("Failed to acquire lock on {path}: timed out after {waited:?}")]
    Timeout { path: PathBuf, waited: Duration },
}

impl LockError {
    /// True when acquisition failed only because another holder kept the lock
    /// past the deadline, as opposed to an I/O failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LockError::Timeout { .. })
    }

    /// The lock target the failed attempt was aimed at.
    pub fn path(&self) -> &PathBuf {
        match self {
            LockError::CreateDirFailed { path, .. }
            | LockError::OpenFailed { path, .. }
            | LockError::AcquireFailed { path, .. }
            | LockError::Timeout { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, LockError>;
