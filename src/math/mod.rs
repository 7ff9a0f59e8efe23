//! Arithmetic utilities for reserve and share calculations.
//!
//! - [`div_round`]: `u128` division with an explicit [`Rounding`](crate::domain::Rounding).
//! - [`mul_div`], [`product`], [`isqrt_product`]: 256-bit intermediates for
//!   products of reserves.
//! - [`CheckedArithmetic`]: `Result`-returning arithmetic on domain newtypes.

mod checked;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use rounding::div_round;
pub use wide::{div_wide, isqrt_product, mul_div, product, to_u128, U256};
