//! Per-instance timers
//!
//! Every fish and food sprite owns its own timer, the way each component of
//! the tank would own a `setInterval`/`setTimeout` handle. Timers never run on
//! their own: the tank polls them with the current sim time.

use serde::{Deserialize, Serialize};

/// Sim time in milliseconds
pub type Millis = u64;

/// A repeating timer firing every `period` ms after it was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    period: Millis,
    next_due: Option<Millis>,
}

impl Interval {
    /// Start a timer at `now`; the first firing is one period later
    pub fn start(period: Millis, now: Millis) -> Self {
        debug_assert!(period > 0, "interval period must be positive");
        Self {
            period,
            next_due: Some(now + period),
        }
    }

    /// Next firing time, `None` once cleared
    pub fn next_due(&self) -> Option<Millis> {
        self.next_due
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Consume one firing if due at `now`, scheduling the next one
    pub fn fire(&mut self, now: Millis) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }

    /// Release the timer (`clearInterval`)
    pub fn clear(&mut self) {
        self.next_due = None;
    }
}

/// A one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeout {
    deadline: Option<Millis>,
}

impl Timeout {
    pub fn start(delay: Millis, now: Millis) -> Self {
        Self {
            deadline: Some(now + delay),
        }
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Consume the timeout if it has elapsed at `now`
    pub fn fire(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_once_per_period() {
        let mut timer = Interval::start(50, 1000);
        assert_eq!(timer.next_due(), Some(1050));

        assert!(!timer.fire(1049));
        assert!(timer.fire(1050));
        assert_eq!(timer.next_due(), Some(1100));

        // A late poll fires once and keeps the original phase
        assert!(timer.fire(1180));
        assert_eq!(timer.next_due(), Some(1150));
        assert!(timer.fire(1180));
        assert!(!timer.fire(1180));
    }

    #[test]
    fn test_cleared_interval_never_fires() {
        let mut timer = Interval::start(50, 0);
        timer.clear();
        assert!(!timer.is_active());
        assert!(!timer.fire(10_000));

    }

    #[test]
    fn test_timeout_is_one_shot() {
        let mut timeout = Timeout::start(5000, 200);
        assert!(!timeout.fire(5199));
        assert!(timeout.fire(5200));
        assert!(!timeout.fire(9000));
        assert_eq!(timeout.deadline(), None);
    }
}
