//! Renewal timing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How often the main loop wakes to check the schedule.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Granularity of [`sleep_while_running`]; bounds shutdown latency.
const SLEEP_STEP: Duration = Duration::from_millis(200);

/// Fixed-interval schedule. The next run is always measured from the last
/// one, so a slow renewal pushes the following one back.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    interval: Duration,
    next_due: Instant,
}

impl Schedule {
    /// First run due one `interval` after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    pub fn mark_ran(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Sleep for `total`, waking early once `running` goes false.
/// Returns whether the flag was still set at the end.
pub fn sleep_while_running(running: &AtomicBool, total: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < total {
        if !running.load(Ordering::SeqCst) {
            return false;
        }
        std::thread::sleep(SLEEP_STEP.min(total.saturating_sub(start.elapsed())));
    }
    running.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn not_due_before_interval() {
        let t0 = Instant::now();
        let s = Schedule::new(48 * HOUR, t0);
        assert!(!s.is_due(t0));
        assert!(!s.is_due(t0 + 47 * HOUR));
        assert!(s.is_due(t0 + 48 * HOUR));
        assert_eq!(s.next_due(), t0 + 48 * HOUR);
    }

    #[test]
    fn mark_ran_measures_from_run_time() {
        let t0 = Instant::now();
        let mut s = Schedule::new(HOUR, t0);
        let late = t0 + HOUR + Duration::from_secs(90);
        assert!(s.is_due(late));
        s.mark_ran(late);
        assert!(!s.is_due(late));
        assert_eq!(s.next_due(), late + HOUR);
        assert_eq!(s.interval(), HOUR);
    }

    #[test]
    fn sleep_returns_early_when_stopped() {
        let running = AtomicBool::new(false);
        let start = Instant::now();
        assert!(!sleep_while_running(&running, Duration::from_secs(30)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn sleep_runs_full_duration_while_running() {
        let running = AtomicBool::new(true);
        let start = Instant::now();
        assert!(sleep_while_running(&running, Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
