use crate::domain::ports::Clock;
use std::time::{Duration, Instant};

/// Whole-transfer liveness budget. Captured once at poll-loop entry and
/// never extended; when it elapses the dispatcher kicks the process.
#[derive(Debug, Clone, Copy)]
pub struct Watchdog {
    deadline: Instant,
}

impl Watchdog {
    pub fn new<K: Clock>(clock: &K, timeout: Duration) -> Self {
        Self {
            deadline: clock.now() + timeout,
        }
    }

    pub fn expired<K: Clock>(&self, clock: &K) -> bool {
        clock.now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ManualClock {
        start: Instant,
        offset: Mutex<Duration>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                offset: Mutex::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            *self.offset.lock().unwrap() += by;
        }
    }

    #[async_trait]
    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.start + *self.offset.lock().unwrap()
        }

        async fn sleep(&self, dur: Duration) {
            self.advance(dur);
        }
    }

    #[test]
    fn test_not_expired_before_deadline() {
        let clock = ManualClock::new();
        let watchdog = Watchdog::new(&clock, Duration::from_secs(60));

        assert!(!watchdog.expired(&clock));
        clock.advance(Duration::from_secs(59));
        assert!(!watchdog.expired(&clock));
    }

    #[test]
    fn test_expired_at_and_after_deadline() {
        let clock = ManualClock::new();
        let watchdog = Watchdog::new(&clock, Duration::from_secs(60));

        clock.advance(Duration::from_secs(60));
        assert!(watchdog.expired(&clock));
        clock.advance(Duration::from_secs(1));
        assert!(watchdog.expired(&clock));
    }

    #[test]
    fn test_deadline_is_fixed_at_creation() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(100));
        let watchdog = Watchdog::new(&clock, Duration::from_secs(10));

        clock.advance(Duration::from_secs(9));
        assert!(!watchdog.expired(&clock));
        clock.advance(Duration::from_secs(1));
        assert!(watchdog.expired(&clock));
    }
}
