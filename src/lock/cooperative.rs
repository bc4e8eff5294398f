//! Cooperative driver: waiting yields the task back to the async scheduler.

use crate::diagnostics::LockEvent;
use crate::error::{LockError, Result};
use crate::lock::handle::{self, LockFile};
use crate::lock::options::LockOptions;
use crate::lock::protocol::AcquireState;
use std::path::Path;

/// Scoped exclusive lock on a file for async callers.
///
/// Runs the same polling algorithm as [`FileLock`](crate::lock::FileLock),
/// but the retry wait is a `tokio::time::sleep`, so other tasks on the same
/// thread keep running while this one waits. Opening the file and the
/// individual lock attempts never block, so they run inline; the retry wait
/// is the only suspension point.
#[derive(Debug)]
pub struct AsyncFileLock {
    handle: LockFile,
    options: LockOptions,
}

impl AsyncFileLock {
    /// Acquire the lock at `lock_path`, yielding between attempts.
    pub async fn acquire(lock_path: &Path, options: &LockOptions) -> Result<Self> {
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
                return Ok(AsyncFileLock {
                    handle,
                    options: options.clone(),
                });
            }

            match state.next_wait() {
                Some(interval) => tokio::time::sleep(interval).await,
                None => {
                    let waited = state.waited();
                    options.emit(LockEvent::TimedOut {
                        path: handle.path(),
                        waited,
                    });
                    return Err(LockError::Timeout {
                        path: handle.path().to_path_buf(),
                        waited,
                    });
                }
            }
        }
    }

    /// Release before the end of scope. Equivalent to dropping the guard;
    /// release itself never suspends.
    pub fn release(self) {}

    pub fn held(&self) -> bool {
        self.handle.held()
    }

    pub fn path(&self) -> &Path {
        self.handle.path()
    }
}

impl Drop for AsyncFileLock {
    fn drop(&mut self) {
        if self.handle.held() {
            self.handle.release();
            self.options.emit(LockEvent::Released {
                path: self.handle.path(),
            });
        }
    }
}

/// Async form of the probe-and-restore check. The underlying attempt is
/// non-blocking, so this completes without suspending.
pub async fn is_locked(lock_path: &Path) -> Result<bool> {
    handle::probe(lock_path)
}
