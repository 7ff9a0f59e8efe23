//! Core swap trait for executing swaps and querying pool state.
//!
//! [`SwapPool`] covers the trading side of a pool:
//!
//! 1. **Execute**: [`SwapPool::swap`] sells an exact input for at least a
//!    minimum output.
//! 2. **Quote**: [`SwapPool::quote_out`] and [`SwapPool::spot_price`] price
//!    a trade without mutating anything.
//! 3. **Inspect**: [`SwapPool::pair`], [`SwapPool::fee_tier`] and
//!    [`SwapPool::get_reserves`].
//!
//! # Product invariant
//!
//! The fee is retained in the input reserve, so for every successful swap
//!
//! ```text
//! reserve_in' * reserve_out' >= reserve_in * reserve_out
//! ```
//!
//! Implementations verify this before committing and report a violation
//! as [`DexError::InvariantViolation`](crate::error::DexError::InvariantViolation).

use crate::domain::{Amount, AssetId, AssetPair, FeeTier, SwapResult};
use crate::error::Result;

/// Trading interface of a two-asset pool.
pub trait SwapPool {
    /// Sells exactly `amount_in` of `asset_in` for the pair's other asset.
    ///
    /// Reserves change only if every check passes; on error the pool is
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidAsset`](crate::error::DexError::InvalidAsset) if
    ///   `asset_in` is not in the pair.
    /// - [`DexError::InvalidInput`](crate::error::DexError::InvalidInput) for a
    ///   zero input.
    /// - [`DexError::InsufficientLiquidity`](crate::error::DexError::InsufficientLiquidity)
    ///   if the pool has no reserves.
    /// - [`DexError::InsufficientOutputAmount`](crate::error::DexError::InsufficientOutputAmount)
    ///   if the output is zero or below `min_amount_out`.
    /// - [`DexError::InvariantViolation`](crate::error::DexError::InvariantViolation)
    ///   if the reserve product would decrease.
    fn swap(
        &mut self,
        amount_in: Amount,
        asset_in: AssetId,
        min_amount_out: Amount,
    ) -> Result<SwapResult>;

    /// Output `swap` would produce for `amount_in` of `asset_in`.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`swap`](Self::swap), without the slippage check.
    fn quote_out(&self, amount_in: Amount, asset_in: AssetId) -> Result<Amount>;

    /// Reserves oriented as `(reserve_in, reserve_out)` for a trade selling
    /// `asset_in`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidAsset`](crate::error::DexError::InvalidAsset)
    /// if `asset_in` is not in the pair.
    fn reserves_for(&self, asset_in: AssetId) -> Result<(Amount, Amount)>;

    /// Units of the other asset per unit of `base`, for display.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidAsset`](crate::error::DexError::InvalidAsset) if
    ///   `base` is not in the pair.
    /// - [`DexError::InsufficientLiquidity`](crate::error::DexError::InsufficientLiquidity)
    ///   if the pool is empty.
    fn spot_price(&self, base: AssetId) -> Result<f64>;

    /// The canonical pair the pool trades.
    #[must_use]
    fn pair(&self) -> &AssetPair;

    /// The fee retained on every input.
    #[must_use]
    fn fee_tier(&self) -> FeeTier;

    /// Current `(reserve_a, reserve_b)` in canonical order.
    #[must_use]
    fn get_reserves(&self) -> (Amount, Amount);
}
