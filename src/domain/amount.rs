//! Raw asset amount with checked arithmetic.

use core::fmt;

use super::Rounding;
use crate::error::{DexError, Result};

/// Number of fractional digits carried by every asset.
pub const DECIMALS: u32 = 18;

/// `10^DECIMALS`: raw units in one whole asset.
const SCALE: u128 = 1_000_000_000_000_000_000;

/// A non-negative asset amount in raw units.
///
/// Every asset uses fixed-point with [`DECIMALS`] fractional digits, so
/// `Amount::ONE` is one whole unit.  Arithmetic methods are checked: they
/// return `None` on overflow, underflow, or division by zero instead of
/// panicking.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_div(&Amount::new(3), Rounding::Up), Some(Amount::new(67)));
/// assert_eq!(Amount::from_whole(2), Some(Amount::new(2_000_000_000_000_000_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// One whole unit (`10^18` raw units).
    pub const ONE: Self = Self(SCALE);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from raw units.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Creates an amount of `whole` units.  Returns `None` on overflow.
    #[must_use]
    pub const fn from_whole(whole: u128) -> Option<Self> {
        match whole.checked_mul(SCALE) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Parses a decimal string such as `"500"` or `"0.25"` into raw units.
    ///
    /// At most [`DECIMALS`] fractional digits are accepted.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidInput`] for empty, signed, or non-numeric text, or
    ///   for too many fractional digits.
    /// - [`DexError::Overflow`] if the value does not fit.
    pub fn parse_units(text: &str) -> Result<Self> {
        let text = text.trim();
        let (whole, frac) = match text.split_once('.') {
            Some((w, f)) => (w, f),
            None => (text, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(DexError::InvalidInput("empty amount"));
        }
        if frac.len() > DECIMALS as usize {
            return Err(DexError::InvalidInput("too many fractional digits"));
        }
        let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !digits_only(whole) || !digits_only(frac) {
            return Err(DexError::InvalidInput("amount must be an unsigned decimal"));
        }

        let whole_raw = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .map_err(|_| DexError::Overflow("whole part too large"))?
        };
        let mut frac_raw: u128 = 0;
        let mut scale = SCALE;
        for b in frac.bytes() {
            scale /= 10;
            frac_raw += u128::from(b - b'0') * scale;
        }

        whole_raw
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(frac_raw))
            .map(Self)
            .ok_or(DexError::Overflow("amount exceeds u128"))
    }

    /// Returns the raw `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        match crate::math::div_round(self.0, divisor.0, rounding) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}
