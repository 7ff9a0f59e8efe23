//! 256-bit intermediates for reserve arithmetic.
//!
//! Reserves are 18-decimal `u128` values, so the product of two reserves
//! routinely exceeds `u128`.  The helpers here widen to [`U256`], perform
//! the multiplication and division there, and narrow back with an explicit
//! overflow check.
//!
//! ```
//! use hydra_dex::domain::Rounding;
//! use hydra_dex::math::{isqrt_product, mul_div};
//!
//! let big = u128::MAX / 2;
//! assert_eq!(mul_div(big, 4, 4, Rounding::Down), Ok(big));
//! assert_eq!(isqrt_product(500, 500), 500);
//! ```

pub use primitive_types::U256;

use crate::domain::Rounding;
use crate::error::{DexError, Result};

/// Exact `a * b` in 256 bits.  Never overflows.
#[must_use]
pub fn product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Narrows a `U256` to `u128`.
///
/// # Errors
///
/// Returns [`DexError::Overflow`] with `context` if the value exceeds `u128::MAX`.
pub fn to_u128(value: U256, context: &'static str) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(DexError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// Divides `numerator` by `denominator` in 256 bits with explicit rounding.
///
/// # Errors
///
/// Returns [`DexError::DivisionByZero`] if `denominator` is zero.
pub fn div_wide(numerator: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(DexError::DivisionByZero);
    }
    let (q, r) = numerator.div_mod(denominator);
    if rounding.is_up() && !r.is_zero() {
        // q < numerator <= U256::MAX whenever r != 0 and denominator > 1
        return Ok(q + U256::one());
    }
    Ok(q)
}

/// `a * b / d` with a 256-bit intermediate.
///
/// # Errors
///
/// - [`DexError::DivisionByZero`] if `d` is zero.
/// - [`DexError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, d: u128, rounding: Rounding) -> Result<u128> {
    let q = div_wide(product(a, b), U256::from(d), rounding)?;
    to_u128(q, "mul_div result exceeds u128")
}

/// `floor(sqrt(a * b))`.
///
/// The square root of a product of two `u128` values always fits in `u128`.
#[must_use]
pub fn isqrt_product(a: u128, b: u128) -> u128 {
    product(a, b).integer_sqrt().low_u128()
}
