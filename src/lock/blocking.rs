//! Blocking driver: waiting suspends the calling thread.

use crate::diagnostics::LockEvent;
use crate::error::{LockError, Result};
use crate::lock::handle::{self, LockFile};
use crate::lock::options::LockOptions;
use crate::lock::protocol::AcquireState;
use std::path::Path;
use std::thread;

/// Scoped exclusive lock on a file, acquired by polling with the calling
/// thread parked between attempts.
///
/// Dropping the guard releases the lock, so every exit from the protected
/// scope — normal return, early return, or unwinding — gives it back exactly
/// once. No fairness is provided beyond what the OS grants: contenders are
/// not served in request order.
#[derive(Debug)]
pub struct FileLock {
    handle: LockFile,
    options: LockOptions,
}

impl FileLock {
    /// Acquire the lock at `lock_path`, waiting according to `options`.
    ///
    /// Returns [`LockError::Timeout`] when the deadline passes first; I/O
    /// failures opening the lock file surface immediately without retry.
    pub fn acquire(lock_path: &Path, options: &LockOptions) -> Result<Self> {
        let mut handle = LockFile::open(lock_path)?;
        let state = AcquireState::new(options);

        loop {
            options.emit(LockEvent::Attempting {
                path: handle.path(),
            });

            if handle.try_acquire()? {
                options.emit(LockEvent::Acquired {
                    path: handle.path(),
                });
                return Ok(FileLock {
                    handle,
                    options: options.clone(),
                });
            }

            match state.next_wait() {
                Some(interval) => thread::sleep(interval),
                None => {
                    let waited = state.waited();
                    options.emit(LockEvent::TimedOut {
                        path: handle.path(),
                        waited,
                    });
                    // handle was never held; dropping it just closes the descriptor
                    return Err(LockError::Timeout {
                        path: handle.path().to_path_buf(),
                        waited,
                    });
                }
            }
        }
    }

    /// Release before the end of scope. Equivalent to dropping the guard.
    pub fn release(self) {}

    pub fn held(&self) -> bool {
        self.handle.held()
    }

    pub fn path(&self) -> &Path {
        self.handle.path()
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if self.handle.held() {
            self.handle.release();
            self.options.emit(LockEvent::Released {
                path: self.handle.path(),
            });
        }
    }
}

/// Whether the target currently appears to be held, via a probe-and-restore
/// check on a fresh descriptor. Racy by nature; diagnostic use only.
pub fn is_locked(lock_path: &Path) -> Result<bool> {
    handle::probe(lock_path)
}
