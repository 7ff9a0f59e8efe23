//! Registry, ledger, and journal in one value.

use tracing::{debug, error};

use crate::config::ExchangeConfig;
use crate::domain::{AccountId, Amount, AssetId, AssetPair, DexEvent, FeeTier, PoolId, Shares};
use crate::error::{DexError, Result};
use crate::ledger::{AssetLedger, PreparedTransfers};
use crate::math::CheckedArithmetic;
use crate::pools::PairPool;
use crate::registry::{PairRegistry, StagedPools};
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

/// Complete exchange state.
///
/// Direct methods cover registry queries, pair creation, asset issuance and
/// transfers, and LP share movements.  Liquidity and swap operations go
/// through a [`Router`](crate::router::Router).
///
/// # Examples
///
/// ```
/// use hydra_dex::config::ExchangeConfig;
/// use hydra_dex::domain::{Amount, AssetId};
/// use hydra_dex::exchange::Exchange;
/// use hydra_dex::traits::FromConfig;
///
/// let a = AssetId::from_bytes([1u8; 20]);
/// let b = AssetId::from_bytes([2u8; 20]);
///
/// let mut exchange = Exchange::from_config(&ExchangeConfig::default()).expect("valid");
/// let pool = exchange.create_pair(a, b).expect("new pair");
/// assert_eq!(exchange.get_pair(b, a), Some(pool));
/// assert_eq!(exchange.get_reserves(pool), Ok((Amount::ZERO, Amount::ZERO)));
/// assert_eq!(exchange.events().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    config: ExchangeConfig,
    registry: PairRegistry,
    ledger: AssetLedger,
    events: Vec<DexEvent>,
}

impl FromConfig<ExchangeConfig> for Exchange {
    fn from_config(config: &ExchangeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: *config,
            registry: PairRegistry::new(*config.registry()),
            ledger: AssetLedger::new(),
            events: Vec::new(),
        })
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self {
            config: ExchangeConfig::default(),
            registry: PairRegistry::default(),
            ledger: AssetLedger::new(),
            events: Vec::new(),
        }
    }
}

impl Exchange {
    /// The configuration this exchange was built from.
    #[must_use]
    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Read access to the pair registry.
    #[must_use]
    pub const fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    /// Read access to the asset ledger.
    #[must_use]
    pub const fn ledger(&self) -> &AssetLedger {
        &self.ledger
    }

    /// Every committed event, oldest first.
    #[must_use]
    pub fn events(&self) -> &[DexEvent] {
        &self.events
    }

    /// Removes and returns the journal.
    pub fn drain_events(&mut self) -> Vec<DexEvent> {
        core::mem::take(&mut self.events)
    }

    // -- registry -------------------------------------------------------------

    /// Registers an empty pool for `(x, y)` with the default fee.
    ///
    /// # Errors
    ///
    /// See [`PairRegistry::create_pair`].
    pub fn create_pair(&mut self, x: AssetId, y: AssetId) -> Result<PoolId> {
        let fee = self.registry.config().default_fee_tier();
        self.create_pair_with_fee(x, y, fee)
    }

    /// Registers an empty pool for `(x, y)` with an explicit fee.
    ///
    /// # Errors
    ///
    /// See [`PairRegistry::create_pair_with_fee`].
    pub fn create_pair_with_fee(&mut self, x: AssetId, y: AssetId, fee: FeeTier) -> Result<PoolId> {
        let pool = self.registry.create_pair_with_fee(x, y, fee)?;
        let pair = AssetPair::new(x, y)?;
        self.events.push(DexEvent::PairCreated {
            pool,
            pair,
            all_pairs_length: self.registry.all_pairs_length(),
        });
        Ok(pool)
    }

    /// Pool for `(x, y)` in either order, if registered.
    #[must_use]
    pub fn get_pair(&self, x: AssetId, y: AssetId) -> Option<PoolId> {
        self.registry.get_pair(x, y)
    }

    /// Number of registered pairs.
    #[must_use]
    pub fn all_pairs_length(&self) -> usize {
        self.registry.all_pairs_length()
    }

    /// The `index`-th pair in creation order.
    #[must_use]
    pub fn pair_at(&self, index: usize) -> Option<AssetPair> {
        self.registry.pair_at(index)
    }

    /// The pool registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn pool(&self, id: PoolId) -> Result<&PairPool> {
        self.registry.pool(id)
    }

    /// Canonical-order reserves of pool `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn get_reserves(&self, id: PoolId) -> Result<(Amount, Amount)> {
        self.registry.get_reserves(id)
    }

    // -- assets ---------------------------------------------------------------

    /// Issues `amount` of `asset` to `to`.
    ///
    /// # Errors
    ///
    /// See [`AssetLedger::mint`].
    pub fn mint_asset(&mut self, asset: AssetId, to: AccountId, amount: Amount) -> Result<()> {
        self.ledger.mint(asset, to, amount)?;
        self.events.push(DexEvent::Transfer {
            asset: Some(asset),
            pool: None,
            from: AccountId::zero(),
            to,
            amount: amount.get(),
        });
        Ok(())
    }

    /// Balance of `account` in `asset`.
    #[must_use]
    pub fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount {
        self.ledger.balance_of(asset, account)
    }

    /// Total issued supply of `asset`.
    #[must_use]
    pub fn total_supply(&self, asset: AssetId) -> Amount {
        self.ledger.total_supply(asset)
    }

    /// Sets `spender`'s allowance over `owner`'s `asset`.
    pub fn approve(&mut self, asset: AssetId, owner: AccountId, spender: AccountId, amount: Amount) {
        self.ledger.approve(asset, owner, spender, amount);
        self.events.push(DexEvent::Approval {
            asset: Some(asset),
            pool: None,
            owner,
            spender,
            amount: amount.get(),
        });
    }

    /// Amount of `asset` `spender` may still move for `owner`.
    #[must_use]
    pub fn allowance(&self, asset: AssetId, owner: AccountId, spender: AccountId) -> Amount {
        self.ledger.allowance(asset, owner, spender)
    }

    /// Moves `amount` of `asset` between accounts.
    ///
    /// # Errors
    ///
    /// See [`AssetLedger::transfer`].
    pub fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.ledger.transfer(asset, from, to, amount)?;
        self.events.push(DexEvent::Transfer {
            asset: Some(asset),
            pool: None,
            from,
            to,
            amount: amount.get(),
        });
        Ok(())
    }

    // -- LP shares ------------------------------------------------------------

    /// Share balance of `owner` in pool `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn share_balance(&self, id: PoolId, owner: AccountId) -> Result<Shares> {
        Ok(self.registry.pool(id)?.share_balance(&owner))
    }

    /// Outstanding shares of pool `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn total_shares(&self, id: PoolId) -> Result<Shares> {
        Ok(self.registry.pool(id)?.total_shares())
    }

    /// Sets `spender`'s allowance over `owner`'s shares of pool `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn approve_shares(
        &mut self,
        id: PoolId,
        owner: AccountId,
        spender: AccountId,
        shares: Shares,
    ) -> Result<()> {
        let mut stage = self.registry.stage();
        stage.pool_mut(id)?.approve_shares(owner, spender, shares);
        let staged = stage.into_changes();
        self.registry.commit(staged)?;
        self.events.push(DexEvent::Approval {
            asset: None,
            pool: Some(id),
            owner,
            spender,
            amount: shares.get(),
        });
        Ok(())
    }

    /// Remaining share allowance of `spender` over `owner` in pool `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn share_allowance(&self, id: PoolId, owner: AccountId, spender: AccountId) -> Result<Shares> {
        Ok(self.registry.pool(id)?.share_allowance(&owner, &spender))
    }

    /// Moves shares of pool `id` between accounts.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownPool`] for an unassigned identifier.
    /// - [`DexError::InsufficientShares`] if `from` holds too few shares.
    pub fn transfer_shares(
        &mut self,
        id: PoolId,
        from: AccountId,
        to: AccountId,
        shares: Shares,
    ) -> Result<()> {
        let mut stage = self.registry.stage();
        stage.pool_mut(id)?.transfer_shares(from, to, shares)?;
        let staged = stage.into_changes();
        self.registry.commit(staged)?;
        self.events.push(DexEvent::Transfer {
            asset: None,
            pool: Some(id),
            from,
            to,
            amount: shares.get(),
        });
        Ok(())
    }

    // -- invariants -----------------------------------------------------------

    /// Checks that the supply of `asset` equals account balances plus every
    /// pool reserve of `asset`, and that every pool's share ledger is
    /// consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvariantViolation`] on any mismatch.
    pub fn check_conservation(&self, asset: AssetId) -> Result<()> {
        let mut held = self.ledger.circulating(asset);
        for (_, pool) in self.registry.iter() {
            pool.check_invariants()?;
            if pool.pair().contains(&asset) {
                held = held
                    .safe_add(&pool.reserve_of(asset)?, "custody overflow")
                    .map_err(|_| DexError::InvariantViolation("custody overflow"))?;
            }
        }
        if held != self.ledger.total_supply(asset) {
            error!(%asset, %held, supply = %self.ledger.total_supply(asset), "asset not conserved");
            return Err(DexError::InvariantViolation("asset supply not conserved"));
        }
        Ok(())
    }

    /// Applies the outcome of a validated router operation.
    ///
    /// Both change sets are checked against the current state before
    /// either is applied.
    pub(crate) fn settle(
        &mut self,
        pools: StagedPools,
        transfers: PreparedTransfers,
        events: Vec<DexEvent>,
    ) -> Result<()> {
        self.registry.ensure_current(&pools)?;
        self.ledger.ensure_current(&transfers)?;
        self.registry.commit(pools)?;
        self.ledger.commit(transfers)?;
        debug!(events = events.len(), "operation settled");
        self.events.extend(events);
        Ok(())
    }
}
