//! Timing state for the shared acquisition algorithm.
//!
//! Both drivers run the same loop: attempt, then ask [`AcquireState`] whether
//! to keep waiting. Only the suspension mechanism differs between them, so the
//! timeout accounting cannot drift apart.

use crate::lock::options::LockOptions;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub(crate) struct AcquireState {
    started: Instant,
    timeout: Option<Duration>,
    poll_interval: Duration,
}

impl AcquireState {
    pub fn new(options: &LockOptions) -> Self {
        Self {
            started: Instant::now(),
            timeout: options.timeout,
            poll_interval: options.poll_interval,
        }
    }

    /// Decide what follows a refused attempt: `Some(interval)` to wait and
    /// retry, `None` when the deadline has passed.
    ///
    /// The deadline is wall-clock elapsed since construction, not a countdown
    /// decremented by sleep time, so scheduling jitter cannot stretch the
    /// effective timeout. A zero timeout never waits: the first refused
    /// attempt is already past the deadline.
    pub fn next_wait(&self) -> Option<Duration> {
        match self.timeout {
            None => Some(self.poll_interval),
            Some(limit) if self.started.elapsed() >= limit => None,
            Some(_) => Some(self.poll_interval),
        }
    }

    pub fn waited(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::DEFAULT_POLL_INTERVAL;
    use std::thread;

    #[test]
    fn test_no_timeout_always_waits() {
        let state = AcquireState::new(&LockOptions::new());
        assert_eq!(state.next_wait(), Some(DEFAULT_POLL_INTERVAL));
    }

    #[test]
    fn test_zero_timeout_never_waits() {
        let state = AcquireState::new(&LockOptions::new().timeout(Duration::ZERO));
        assert_eq!(state.next_wait(), None);
    }

    #[test]
    fn test_deadline_is_wall_clock() {
        let options = LockOptions::new()
            .timeout(Duration::from_millis(50))
            .poll_interval(Duration::from_millis(10));
        let state = AcquireState::new(&options);

        assert_eq!(state.next_wait(), Some(Duration::from_millis(10)));
        thread::sleep(Duration::from_millis(60));
        assert_eq!(state.next_wait(), None);
        assert!(state.waited() >= Duration::from_millis(50));
    }
}
