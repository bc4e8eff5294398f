use crate::diagnostics::{DiagnosticsSink, LockEvent, TraceSink};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Delay between successive non-blocking attempts while waiting.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Per-attempt acquisition parameters. Built once by the caller and never
/// mutated by the protocol.
#[derive(Clone)]
pub struct LockOptions {
    pub(crate) timeout: Option<Duration>,
    pub(crate) poll_interval: Duration,
    pub(crate) diagnostics: Option<Arc<dyn DiagnosticsSink>>,
}

impl LockOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum time to wait for the lock. `Duration::ZERO` means a single
    /// non-blocking attempt: fail immediately on contention, no sleep at all.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Timeout given in seconds, matching the configuration surface.
    pub fn timeout_secs(self, secs: f64) -> Self {
        self.timeout(Duration::from_secs_f64(secs))
    }

    /// Wait indefinitely for the lock (the default).
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Install a sink to observe the attempting/acquired/timed-out/released
    /// lifecycle events. Without one the protocol is silent.
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Convenience toggle: `true` installs [`TraceSink`], `false` removes any
    /// configured sink.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled.then(|| Arc::new(TraceSink) as Arc<dyn DiagnosticsSink>);
        self
    }

    pub(crate) fn emit(&self, event: LockEvent<'_>) {
        if let Some(sink) = &self.diagnostics {
            sink.record(event);
        }
    }
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            diagnostics: None,
        }
    }
}

impl fmt::Debug for LockOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockOptions")
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}
