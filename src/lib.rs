//! File-based mutual exclusion across processes and async tasks.
//!
//! A lock file at a caller-supplied path is the arbitration anchor: the OS
//! advisory exclusive lock on it admits at most one holder machine-wide. On
//! top of that primitive this crate adds a bounded-wait acquisition protocol
//! (fixed-interval polling with an optional wall-clock deadline) and a guard
//! that releases on every exit path. The same protocol is available to
//! blocking callers ([`FileLock`]) and async callers ([`AsyncFileLock`]);
//! only the suspension mechanism differs.
//!
//! Locks are advisory: only cooperating processes that take the lock respect
//! it. There is no fairness guarantee — when several contenders wait, the OS
//! decides who gets the lock next, not arrival order. Acquisition is not
//! reentrant; a second attempt from the current holder waits like any other
//! contender.

pub mod diagnostics;
pub mod error;
pub mod lock;

pub use diagnostics::{DiagnosticsSink, LockEvent, TraceSink};
pub use error::{LockError, Result};
pub use lock::{AsyncFileLock, FileLock, LockFile, LockOptions, DEFAULT_POLL_INTERVAL};
