//! Lifecycle diagnostics for lock acquisition.
//!
//! The protocol itself stays silent: when a sink is configured it receives the
//! four lifecycle events, otherwise nothing is emitted anywhere. Formatting
//! and I/O are entirely the sink's concern.

use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// One lifecycle event from a lock attempt or holding period.
#[derive(Debug, Clone, Copy)]
pub enum LockEvent<'a> {
    /// About to make one non-blocking attempt on the target.
    Attempting { path: &'a Path },
    /// The attempt succeeded; the caller now holds the lock.
    Acquired { path: &'a Path },
    /// The deadline passed before the lock was granted.
    TimedOut { path: &'a Path, waited: Duration },
    /// The holder gave the lock back.
    Released { path: &'a Path },
}

/// Receives lock lifecycle events.
///
/// Implementations must be cheap and non-blocking; `record` is called from
/// inside the retry loop.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: LockEvent<'_>);
}

/// Sink that forwards every event to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceSink;

impl DiagnosticsSink for TraceSink {
    fn record(&self, event: LockEvent<'_>) {
        match event {
            LockEvent::Attempting { path } => {
                debug!("Attempting to acquire lock: {}", path.display());
            }
            LockEvent::Acquired { path } => {
                debug!("Lock acquired: {}", path.display());
            }
            LockEvent::TimedOut { path, waited } => {
                debug!("Lock timed out after {:?}: {}", waited, path.display());
            }
            LockEvent::Released { path } => {
                debug!("Lock released: {}", path.display());
            }
        }
    }
}
