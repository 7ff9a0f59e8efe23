//! Unix timestamps for deadlines.

use core::fmt;

/// Seconds since the Unix epoch.
///
/// ```
/// use hydra_dex::domain::Timestamp;
///
/// let deadline = Timestamp::from_secs(1_000);
/// assert!(Timestamp::from_secs(1_001).is_after(deadline));
/// assert!(!Timestamp::from_secs(1_000).is_after(deadline));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch.
    pub const EPOCH: Self = Self(0);

    /// The far future; a deadline that never expires.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates a timestamp from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the number of seconds since the epoch.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Returns `true` if `self` is strictly later than `other`.
    #[must_use]
    pub const fn is_after(&self, other: Self) -> bool {
        self.0 > other.0
    }

    /// Adds `secs`, saturating at [`Timestamp::MAX`].
    #[must_use]
    pub const fn saturating_add(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
