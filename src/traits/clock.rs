//! Time source used for deadline checks.

use crate::domain::Timestamp;

/// Supplies the current time to the router.
///
/// See [`SystemClock`](crate::clock::SystemClock) and
/// [`ManualClock`](crate::clock::ManualClock).
pub trait Clock {
    /// Current time in whole seconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
