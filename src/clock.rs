//! [`Clock`] implementations.

use core::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::domain::Timestamp;
use crate::traits::Clock;

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // Pre-epoch system time clamps to the epoch.
        let secs = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        Timestamp::from_secs(secs)
    }
}

/// A clock that only moves when told to.
///
/// ```
/// use hydra_dex::clock::ManualClock;
/// use hydra_dex::domain::Timestamp;
/// use hydra_dex::traits::Clock;
///
/// let clock = ManualClock::new(Timestamp::from_secs(100));
/// clock.advance(20);
/// assert_eq!(clock.now(), Timestamp::from_secs(120));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicU64,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub const fn new(start: Timestamp) -> Self {
        Self {
            secs: AtomicU64::new(start.as_secs()),
        }
    }

    /// Sets the current reading.
    pub fn set(&self, now: Timestamp) {
        self.secs.store(now.as_secs(), Ordering::SeqCst);
    }

    /// Moves the clock forward by `secs`, saturating.
    pub fn advance(&self, secs: u64) {
        let _ = self
            .secs
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |cur| {
                Some(cur.saturating_add(secs))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.secs.load(Ordering::SeqCst))
    }
}
