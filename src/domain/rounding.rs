//! Explicit rounding direction for integer division.

/// Rounding direction for every division in the crate.
///
/// Pricing always rounds against the trader: outputs round
/// [`Down`](Rounding::Down), required inputs round [`Up`](Rounding::Up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Toward positive infinity (ceiling).
    Up,
    /// Toward zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
