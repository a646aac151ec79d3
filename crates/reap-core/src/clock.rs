//! Time source used to compute job durations.
use std::sync::Arc;

use time::OffsetDateTime;

/// Provides the current UTC time.
pub trait Clock: Send + Sync + 'static {
    fn now_utc(&self) -> OffsetDateTime;
}

/// Shared handle to a clock.
pub type ClockHandle = Arc<dyn Clock>;

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    #[inline]
    fn now_utc(&self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn fixed_clock_never_moves() {
        let clock = FixedClock(datetime!(2024-01-02 00:00:00 UTC));
        assert_eq!(clock.now_utc(), clock.now_utc());
        assert_eq!(clock.now_utc().day(), 2);
    }

    #[test]
    fn system_clock_is_utc() {
        assert!(SystemClock.now_utc().offset().is_utc());
    }
}
