//! Constant-product quote formulas.
//!
//! With `c = 10 000 - fee_bps`:
//!
//! ```text
//! amount_out = floor(amount_in * c * reserve_out
//!                    / (reserve_in * 10 000 + amount_in * c))
//!
//! amount_in  = ceil(reserve_in * amount_out * 10 000
//!                   / ((reserve_out - amount_out) * c))
//! ```
//!
//! Outputs round down and required inputs round up, so the pool never
//! pays out more than the invariant permits.  All products are formed in
//! 256 bits.

use tracing::debug;

use crate::domain::{Amount, FeeTier, Rounding, BPS_DENOMINATOR};
use crate::error::{DexError, Result};
use crate::math::{div_wide, mul_div, to_u128, U256};

/// Reserves and fee of one hop, oriented in trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopReserves {
    /// Reserve of the asset paid in.
    pub reserve_in: Amount,
    /// Reserve of the asset paid out.
    pub reserve_out: Amount,
    /// Fee tier of the hop's pool.
    pub fee_tier: FeeTier,
}

impl HopReserves {
    /// Bundles one hop's pricing inputs.
    pub const fn new(reserve_in: Amount, reserve_out: Amount, fee_tier: FeeTier) -> Self {
        Self {
            reserve_in,
            reserve_out,
            fee_tier,
        }
    }
}

/// Pure pricing functions.  Holds no state.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, FeeTier};
/// use hydra_dex::quote::QuoteCalculator;
///
/// let out = QuoteCalculator::amount_out(
///     Amount::new(10),
///     Amount::new(500),
///     Amount::new(500),
///     FeeTier::default(),
/// );
/// assert_eq!(out, Ok(Amount::new(9)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteCalculator;

impl QuoteCalculator {
    /// Output received for selling exactly `amount_in`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidInput`] if `amount_in` or either reserve is zero.
    /// - [`DexError::InvalidFee`] if the fee is 100% or more.
    /// - [`DexError::Overflow`] if an intermediate exceeds 256 bits.
    pub fn amount_out(
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
        fee_tier: FeeTier,
    ) -> Result<Amount> {
        if amount_in.is_zero() {
            return Err(DexError::InvalidInput("amount_in must be positive"));
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(DexError::InvalidInput("reserves must be positive"));
        }
        let complement = U256::from(fee_tier.complement()?);

        let in_with_fee = U256::from(amount_in.get()) * complement;
        let numerator = in_with_fee
            .checked_mul(U256::from(reserve_out.get()))
            .ok_or(DexError::Overflow("amount_out numerator"))?;
        let denominator = (U256::from(reserve_in.get()) * U256::from(BPS_DENOMINATOR))
            .checked_add(in_with_fee)
            .ok_or(DexError::Overflow("amount_out denominator"))?;

        let out = div_wide(numerator, denominator, Rounding::Down)?;
        let out = Amount::new(to_u128(out, "amount_out exceeds u128")?);
        debug!(%amount_in, %reserve_in, %reserve_out, %out, "quoted amount_out");
        Ok(out)
    }

    /// Input required to receive exactly `amount_out`, rounded up.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidInput`] if `amount_out` or either reserve is zero.
    /// - [`DexError::InsufficientLiquidity`] if `amount_out >= reserve_out`.
    /// - [`DexError::InvalidFee`] if the fee is 100% or more.
    /// - [`DexError::Overflow`] if the result does not fit in `u128`.
    pub fn amount_in(
        amount_out: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
        fee_tier: FeeTier,
    ) -> Result<Amount> {
        if amount_out.is_zero() {
            return Err(DexError::InvalidInput("amount_out must be positive"));
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(DexError::InvalidInput("reserves must be positive"));
        }
        if amount_out >= reserve_out {
            return Err(DexError::InsufficientLiquidity);
        }
        let complement = U256::from(fee_tier.complement()?);

        let numerator = (U256::from(reserve_in.get()) * U256::from(amount_out.get()))
            .checked_mul(U256::from(BPS_DENOMINATOR))
            .ok_or(DexError::Overflow("amount_in numerator"))?;
        // reserve_out > amount_out, checked above
        let remaining = U256::from(reserve_out.get() - amount_out.get());
        let denominator = remaining * complement;

        let required = div_wide(numerator, denominator, Rounding::Up)?;
        let required = Amount::new(to_u128(required, "amount_in exceeds u128")?);
        debug!(%amount_out, %reserve_in, %reserve_out, %required, "quoted amount_in");
        Ok(required)
    }

    /// Amount of the second asset matching `amount_a` at the current ratio:
    /// `floor(amount_a * reserve_b / reserve_a)`.  Fee-free.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAmount`] if `amount_a` is zero.
    /// - [`DexError::InsufficientLiquidity`] if either reserve is zero.
    /// - [`DexError::Overflow`] if the result does not fit in `u128`.
    pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
        if amount_a.is_zero() {
            return Err(DexError::InsufficientAmount("quote amount is zero"));
        }
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        mul_div(amount_a.get(), reserve_b.get(), reserve_a.get(), Rounding::Down).map(Amount::new)
    }

    /// Chains [`amount_out`](Self::amount_out) forward across `hops`.
    ///
    /// The result starts with `amount_in` and has `hops.len() + 1` entries;
    /// entry `i + 1` is the output of hop `i`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidPath`] if `hops` is empty.
    /// - Any error of [`amount_out`](Self::amount_out) for any hop.
    pub fn quote_path(amount_in: Amount, hops: &[HopReserves]) -> Result<Vec<Amount>> {
        if hops.is_empty() {
            return Err(DexError::InvalidPath("route has no hops"));
        }
        let mut amounts = Vec::with_capacity(hops.len() + 1);
        amounts.push(amount_in);
        let mut current = amount_in;
        for hop in hops {
            current = Self::amount_out(current, hop.reserve_in, hop.reserve_out, hop.fee_tier)?;
            amounts.push(current);
        }
        Ok(amounts)
    }

    /// Chains [`amount_in`](Self::amount_in) backward across `hops`.
    ///
    /// The result ends with `amount_out`; entry `0` is the input required
    /// at the start of the route.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidPath`] if `hops` is empty.
    /// - Any error of [`amount_in`](Self::amount_in) for any hop.
    pub fn quote_path_in(amount_out: Amount, hops: &[HopReserves]) -> Result<Vec<Amount>> {
        if hops.is_empty() {
            return Err(DexError::InvalidPath("route has no hops"));
        }
        let mut amounts = vec![Amount::ZERO; hops.len() + 1];
        let mut current = amount_out;
        amounts[hops.len()] = current;
        for (i, hop) in hops.iter().enumerate().rev() {
            current = Self::amount_in(current, hop.reserve_in, hop.reserve_out, hop.fee_tier)?;
            amounts[i] = current;
        }
        Ok(amounts)
    }
}
