//! Constant-product pair pool (`x * y = k`) with its own share ledger.
//!
//! The fee is retained inside the input reserve, so the reserve product
//! grows with every swap.  Liquidity providers hold shares recorded
//! directly on the pool; shares are transferable and can be approved to a
//! spender such as the router.
//!
//! # Swap (asset A in)
//!
//! 1. `amount_out = QuoteCalculator::amount_out(amount_in, Ra, Rb, fee)`
//! 2. reject if `amount_out == 0` or `amount_out < min_amount_out`
//! 3. `Ra' = Ra + amount_in`, `Rb' = Rb - amount_out`
//! 4. reject if `Ra' * Rb' < Ra * Rb` (fatal)
//! 5. commit
//!
//! Every method computes its complete new state before assigning any
//! field, so an error leaves the pool untouched.

use std::collections::BTreeMap;

use tracing::{debug, error, warn};

use crate::config::PoolConfig;
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BurnReceipt, FeeTier, MintReceipt, Rounding, Shares,
    SwapResult,
};
use crate::error::{DexError, Result};
use crate::math::{isqrt_product, mul_div, product, CheckedArithmetic, U256};
use crate::quote::QuoteCalculator;
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

/// A constant-product pool for one canonical asset pair.
///
/// Created empty from a [`PoolConfig`] via [`FromConfig`]; the first
/// [`mint`](LiquidityPool::mint) sets the initial price.
///
/// # State
///
/// - `reserve_a` / `reserve_b`: balances of the pair's first and second asset
/// - `total_shares`: outstanding liquidity shares
/// - `balances`: share balance per owner (zero balances are not stored)
/// - `allowances`: share allowance per `(owner, spender)`
///
/// # Example
///
/// ```rust
/// use hydra_dex::config::PoolConfig;
/// use hydra_dex::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier};
/// use hydra_dex::pools::PairPool;
/// use hydra_dex::traits::{FromConfig, LiquidityPool, SwapPool};
///
/// let a = AssetId::from_bytes([1u8; 20]);
/// let b = AssetId::from_bytes([2u8; 20]);
/// let pair = AssetPair::new(a, b).expect("distinct");
/// let cfg = PoolConfig::new(pair, FeeTier::default()).expect("valid config");
/// let mut pool = PairPool::from_config(&cfg).expect("pool created");
///
/// let lp = AccountId::from_bytes([7u8; 20]);
/// pool.mint(Amount::new(500), Amount::new(500), lp).expect("minted");
///
/// let result = pool.swap(Amount::new(10), a, Amount::ZERO).expect("swap ok");
/// assert_eq!(result.amount_out(), Amount::new(9));
/// assert_eq!(pool.get_reserves(), (Amount::new(510), Amount::new(491)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairPool {
    pair: AssetPair,
    fee_tier: FeeTier,
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Shares,
    balances: BTreeMap<AccountId, Shares>,
    allowances: BTreeMap<(AccountId, AccountId), Shares>,
}

impl PairPool {
    /// Returns the reserve of the pair's first asset.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the reserve of the pair's second asset.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns `true` while the pool holds no reserves.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() && self.reserve_b.is_zero()
    }

    /// Current reserve product `reserve_a * reserve_b`.
    #[must_use]
    pub fn k_last(&self) -> U256 {
        product(self.reserve_a.get(), self.reserve_b.get())
    }

    /// Reserve held for `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidAsset`] if `asset` is not in the pair.
    pub fn reserve_of(&self, asset: AssetId) -> Result<Amount> {
        if self.pair.is_first(&asset) {
            Ok(self.reserve_a)
        } else if asset == self.pair.second() {
            Ok(self.reserve_b)
        } else {
            Err(DexError::InvalidAsset("asset is not part of this pool"))
        }
    }

    // -- LP shares ------------------------------------------------------------

    /// Moves `shares` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientShares`] if `from` holds fewer than
    /// `shares`.
    pub fn transfer_shares(&mut self, from: AccountId, to: AccountId, shares: Shares) -> Result<()> {
        let from_after = self
            .share_balance(&from)
            .checked_sub(&shares)
            .ok_or(DexError::InsufficientShares)?;
        if from == to {
            return Ok(());
        }
        let to_after = self
            .share_balance(&to)
            .safe_add(&shares, "share balance overflow")?;
        self.set_balance(from, from_after);
        self.set_balance(to, to_after);
        debug!(%from, %to, %shares, "shares transferred");
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s shares to `shares`.
    pub fn approve_shares(&mut self, owner: AccountId, spender: AccountId, shares: Shares) {
        if shares.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), shares);
        }
    }

    /// Shares `spender` may still move or burn on behalf of `owner`.
    #[must_use]
    pub fn share_allowance(&self, owner: &AccountId, spender: &AccountId) -> Shares {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Shares::ZERO)
    }

    /// Deducts `shares` from `spender`'s allowance over `owner`'s shares.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientAllowance`] if the allowance is too small.
    pub fn spend_share_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        shares: Shares,
    ) -> Result<()> {
        let remaining = self
            .share_allowance(&owner, &spender)
            .checked_sub(&shares)
            .ok_or(DexError::InsufficientAllowance)?;
        self.approve_shares(owner, spender, remaining);
        Ok(())
    }

    /// Checks the share-ledger invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvariantViolation`] if the balances do not sum
    /// to `total_shares` or if emptiness of reserves and shares disagree.
    pub fn check_invariants(&self) -> Result<()> {
        let mut sum = Shares::ZERO;
        for shares in self.balances.values() {
            sum = sum
                .checked_add(shares)
                .ok_or(DexError::InvariantViolation("share balances overflow"))?;
        }
        if sum != self.total_shares {
            return Err(DexError::InvariantViolation(
                "share balances do not sum to total",
            ));
        }
        if self.is_empty() != self.total_shares.is_zero() {
            return Err(DexError::InvariantViolation(
                "empty reserves and zero shares disagree",
            ));
        }
        Ok(())
    }

    fn set_balance(&mut self, owner: AccountId, shares: Shares) {
        if shares.is_zero() {
            self.balances.remove(&owner);
        } else {
            self.balances.insert(owner, shares);
        }
    }

    fn proportional(&self, shares: Shares, reserve: Amount, rounding: Rounding) -> Result<Amount> {
        mul_div(shares.get(), reserve.get(), self.total_shares.get(), rounding).map(Amount::new)
    }
}

impl FromConfig<PoolConfig> for PairPool {
    /// Creates an empty pool.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pair: *config.pair(),
            fee_tier: config.fee_tier(),
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            total_shares: Shares::ZERO,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        })
    }
}

impl SwapPool for PairPool {
    fn swap(
        &mut self,
        amount_in: Amount,
        asset_in: AssetId,
        min_amount_out: Amount,
    ) -> Result<SwapResult> {
        let (reserve_in, reserve_out) = self.reserves_for(asset_in)?;
        let amount_out = self.quote_out(amount_in, asset_in)?;
        if amount_out.is_zero() || amount_out < min_amount_out {
            warn!(%amount_out, %min_amount_out, "swap output below minimum");
            return Err(DexError::InsufficientOutputAmount);
        }
        let fee = self.fee_tier.fee_on(amount_in)?;
        let result = SwapResult::new(amount_in, amount_out, fee)?;

        let new_in = reserve_in.safe_add(&amount_in, "reserve_in overflow after swap")?;
        let new_out = reserve_out.safe_sub(&amount_out, "reserve_out underflow after swap")?;
        if product(new_in.get(), new_out.get()) < product(reserve_in.get(), reserve_out.get()) {
            error!(pair = %self.pair, %amount_in, %amount_out, "reserve product decreased");
            return Err(DexError::InvariantViolation("reserve product decreased"));
        }

        if self.pair.is_first(&asset_in) {
            self.reserve_a = new_in;
            self.reserve_b = new_out;
        } else {
            self.reserve_b = new_in;
            self.reserve_a = new_out;
        }
        debug!(pair = %self.pair, %asset_in, %result, "swap applied");
        Ok(result)
    }

    fn quote_out(&self, amount_in: Amount, asset_in: AssetId) -> Result<Amount> {
        let (reserve_in, reserve_out) = self.reserves_for(asset_in)?;
        if self.is_empty() {
            return Err(DexError::InsufficientLiquidity);
        }
        QuoteCalculator::amount_out(amount_in, reserve_in, reserve_out, self.fee_tier)
    }

    fn reserves_for(&self, asset_in: AssetId) -> Result<(Amount, Amount)> {
        if self.pair.is_first(&asset_in) {
            Ok((self.reserve_a, self.reserve_b))
        } else if asset_in == self.pair.second() {
            Ok((self.reserve_b, self.reserve_a))
        } else {
            Err(DexError::InvalidAsset("asset_in is not part of this pool"))
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn spot_price(&self, base: AssetId) -> Result<f64> {
        let (base_reserve, quote_reserve) = self.reserves_for(base)?;
        if base_reserve.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        Ok(quote_reserve.get() as f64 / base_reserve.get() as f64)
    }

    fn pair(&self) -> &AssetPair {
        &self.pair
    }

    fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    fn get_reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }
}

impl LiquidityPool for PairPool {
    fn mint(
        &mut self,
        amount_a: Amount,
        amount_b: Amount,
        recipient: AccountId,
    ) -> Result<MintReceipt> {
        let (used_a, used_b, minted) = if self.total_shares.is_zero() {
            let minted = Shares::new(isqrt_product(amount_a.get(), amount_b.get()));
            if minted.is_zero() {
                return Err(DexError::InsufficientInitialLiquidity);
            }
            (amount_a, amount_b, minted)
        } else {
            let total = self.total_shares.get();
            let by_a = mul_div(amount_a.get(), total, self.reserve_a.get(), Rounding::Down)?;
            let by_b = mul_div(amount_b.get(), total, self.reserve_b.get(), Rounding::Down)?;
            let minted = Shares::new(by_a.min(by_b));
            if minted.is_zero() {
                return Err(DexError::InsufficientLiquidityMinted);
            }
            // ceil(minted * R / T) <= supplied, since minted <= supplied * T / R
            let used_a = self.proportional(minted, self.reserve_a, Rounding::Up)?;
            let used_b = self.proportional(minted, self.reserve_b, Rounding::Up)?;
            (used_a, used_b, minted)
        };

        let reserve_a = self.reserve_a.safe_add(&used_a, "reserve_a overflow on mint")?;
        let reserve_b = self.reserve_b.safe_add(&used_b, "reserve_b overflow on mint")?;
        let total_shares = self
            .total_shares
            .safe_add(&minted, "total shares overflow")?;
        let balance = self
            .share_balance(&recipient)
            .safe_add(&minted, "share balance overflow")?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.total_shares = total_shares;
        self.set_balance(recipient, balance);
        debug!(pair = %self.pair, %used_a, %used_b, %minted, %recipient, "liquidity minted");

        Ok(MintReceipt {
            amount_a: used_a,
            amount_b: used_b,
            shares: minted,
        })
    }

    fn burn(&mut self, shares: Shares, owner: AccountId) -> Result<BurnReceipt> {
        if shares.is_zero() {
            return Err(DexError::InvalidInput("cannot burn zero shares"));
        }
        let balance = self
            .share_balance(&owner)
            .checked_sub(&shares)
            .ok_or(DexError::InsufficientShares)?;

        let out_a = self.proportional(shares, self.reserve_a, Rounding::Down)?;
        let out_b = self.proportional(shares, self.reserve_b, Rounding::Down)?;
        if out_a.is_zero() || out_b.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }

        let reserve_a = self.reserve_a.safe_sub(&out_a, "reserve_a underflow on burn")?;
        let reserve_b = self.reserve_b.safe_sub(&out_b, "reserve_b underflow on burn")?;
        let total_shares = self
            .total_shares
            .safe_sub(&shares, "total shares underflow")?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.total_shares = total_shares;
        self.set_balance(owner, balance);
        debug!(pair = %self.pair, %out_a, %out_b, %shares, %owner, "liquidity burned");

        Ok(BurnReceipt {
            amount_a: out_a,
            amount_b: out_b,
        })
    }

    fn total_shares(&self) -> Shares {
        self.total_shares
    }

    fn share_balance(&self, owner: &AccountId) -> Shares {
        self.balances.get(owner).copied().unwrap_or(Shares::ZERO)
    }
}
