//! Rounding helpers for integer division.
//!
//! [`div_round`] is the `u128` building block behind
//! [`Amount::checked_div`](crate::domain::Amount::checked_div) and
//! [`BasisPoints::apply`](crate::domain::BasisPoints::apply).  Wider
//! products go through [`mul_div`](super::mul_div).
//!
//! # Convention
//!
//! Every division rounds against the trader:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, burn payout, minted shares | [`Rounding::Down`] |
//! | Required swap input, deposit consumed | [`Rounding::Up`] |
//! | Fee retained | [`Rounding::Up`] |

use crate::domain::Rounding;

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
///
/// ```
/// use hydra_dex::domain::Rounding;
/// use hydra_dex::math::div_round;
///
/// assert_eq!(div_round(7, 2, Rounding::Down), Some(3));
/// assert_eq!(div_round(7, 2, Rounding::Up), Some(4));
/// assert_eq!(div_round(7, 0, Rounding::Up), None);
/// ```
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q < u128::MAX whenever the remainder is non-zero
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}
