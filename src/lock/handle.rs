use crate::error::{LockError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::error;

/// Check if an I/O error indicates lock contention (file locked by another process)
fn is_lock_contention(e: &io::Error) -> bool {
    // Check for WouldBlock (Unix)
    if e.kind() == io::ErrorKind::WouldBlock {
        return true;
    }
    // Check for Windows-specific lock errors
    // ERROR_LOCK_VIOLATION (33) - file region is locked
    // ERROR_SHARING_VIOLATION (32) - file in use by another process
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        if code == 33 || code == 32 {
            return true;
        }
    }
    false
}

/// One open descriptor on a lock target, plus whether this handle currently
/// holds the OS advisory exclusive lock on it.
///
/// A handle belongs to exactly one acquisition attempt; it is never shared
/// between concurrent attempts. The lock file is created if absent and never
/// deleted here — it persists as the arbitration anchor, and its content is
/// never read or written.
#[derive(Debug)]
pub struct LockFile {
    file: File,
    path: PathBuf,
    held: bool,
}

impl LockFile {
    /// Open (creating if necessary) the lock file, creating missing parent
    /// directories first. The handle starts unheld.
    pub fn open(lock_path: &Path) -> Result<Self> {
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| LockError::CreateDirFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut opts = OpenOptions::new();
        opts.create(true).write(true).truncate(true);

        // On Unix, use O_NOFOLLOW to reject symlinks at OS level
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.custom_flags(libc::O_NOFOLLOW);
        }

        let file = opts.open(lock_path).map_err(|e| LockError::OpenFailed {
            path: lock_path.to_path_buf(),
            source: e,
        })?;

        Ok(LockFile {
            file,
            path: lock_path.to_path_buf(),
            held: false,
        })
    }

    /// Make exactly one non-blocking attempt to take the exclusive lock.
    ///
    /// `Ok(true)` means the lock was granted and the handle is now held;
    /// `Ok(false)` means another holder has it. Never blocks. I/O failures
    /// other than contention surface as [`LockError::AcquireFailed`].
    pub fn try_acquire(&mut self) -> Result<bool> {
        match self.file.try_lock_exclusive() {
            Ok(()) => {
                self.held = true;
                Ok(true)
            }
            Err(e) if is_lock_contention(&e) => Ok(false),
            Err(e) => Err(LockError::AcquireFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Release the lock if held. Idempotent: releasing an unheld handle is a
    /// no-op. An unlock failure on a handle we actually hold should not occur;
    /// it is logged rather than surfaced so release stays infallible on every
    /// exit path, including Drop.
    pub fn release(&mut self) {
        if !self.held {
            return;
        }
        self.held = false;
        if let Err(e) = self.file.unlock() {
            error!("Failed to release lock on {}: {}", self.path.display(), e);
        }
    }

    pub fn held(&self) -> bool {
        self.held
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        // Covers normal completion, early return, and unwinding alike. The
        // descriptor itself closes with the File; the lock file persists.
        self.release();
    }
}

/// Probe-and-restore check on a target: open a fresh handle, try the lock, and
/// if granted release it immediately.
///
/// Inherently racy — the answer can be stale by the time it returns, and a
/// successful probe briefly makes this process a holder. Debugging visibility
/// only, never a correctness primitive.
pub(crate) fn probe(lock_path: &Path) -> Result<bool> {
    let mut handle = LockFile::open(lock_path)?;
    if handle.try_acquire()? {
        handle.release();
        Ok(false)
    } else {
        Ok(true)
    }
}
