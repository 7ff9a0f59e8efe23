//! Liquidity management trait extending [`SwapPool`].
//!
//! # Share accounting invariant
//!
//! For every pool:
//!
//! ```text
//! total_shares == Σ share_balance(owner)
//! reserves == (0, 0)  <=>  total_shares == 0
//! ```
//!
//! Only [`LiquidityPool::mint`] and [`LiquidityPool::burn`] change
//! `total_shares`; swaps move reserves but never shares.

use super::SwapPool;
use crate::domain::{AccountId, Amount, BurnReceipt, MintReceipt, Shares};
use crate::error::Result;

/// Pools that issue and redeem liquidity shares.
pub trait LiquidityPool: SwapPool {
    /// Deposits up to `amount_a` / `amount_b` (canonical order) and credits
    /// the minted shares to `recipient`.
    ///
    /// The first deposit mints `floor(sqrt(amount_a * amount_b))` shares
    /// and consumes both amounts in full.  Later deposits mint
    /// `min(amount_a * T / Ra, amount_b * T / Rb)` and consume only what
    /// those shares are worth; any over-supplied remainder is not taken.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientInitialLiquidity`](crate::error::DexError::InsufficientInitialLiquidity)
    ///   if the first deposit would mint zero shares.
    /// - [`DexError::InsufficientLiquidityMinted`](crate::error::DexError::InsufficientLiquidityMinted)
    ///   if a later deposit would mint zero shares.
    fn mint(&mut self, amount_a: Amount, amount_b: Amount, recipient: AccountId)
        -> Result<MintReceipt>;

    /// Burns `shares` held by `owner` and releases the proportional reserves.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidInput`](crate::error::DexError::InvalidInput) if
    ///   `shares` is zero.
    /// - [`DexError::InsufficientShares`](crate::error::DexError::InsufficientShares)
    ///   if `owner` holds fewer than `shares`.
    fn burn(&mut self, shares: Shares, owner: AccountId) -> Result<BurnReceipt>;

    /// Outstanding shares.
    #[must_use]
    fn total_shares(&self) -> Shares;

    /// Shares held by `owner`.
    #[must_use]
    fn share_balance(&self, owner: &AccountId) -> Shares;
}
