//! Append-only directory of pair pools.

use std::collections::BTreeMap;

use tracing::{error, info};

use super::{PoolStage, StagedPools};
use crate::config::{PoolConfig, RegistryConfig};
use crate::domain::{Amount, AssetId, AssetPair, FeeTier, PoolId};
use crate::error::{DexError, Result};
use crate::pools::PairPool;
use crate::traits::{FromConfig, SwapPool};

/// Registry of pools keyed by canonical [`AssetPair`].
///
/// Pools are never removed; [`PoolId`]s are dense indices in creation order.
/// Every change bumps a revision counter, and a [`StagedPools`] is only
/// accepted by the revision it was staged against.
///
/// # Examples
///
/// ```
/// use hydra_dex::config::RegistryConfig;
/// use hydra_dex::domain::AssetId;
/// use hydra_dex::error::DexError;
/// use hydra_dex::registry::PairRegistry;
///
/// let a = AssetId::from_bytes([1u8; 20]);
/// let b = AssetId::from_bytes([2u8; 20]);
///
/// let mut registry = PairRegistry::new(RegistryConfig::default());
/// let id = registry.create_pair(a, b).expect("new pair");
/// assert_eq!(registry.get_pair(b, a), Some(id));
/// assert_eq!(registry.create_pair(b, a), Err(DexError::PairExists));
/// assert_eq!(registry.all_pairs_length(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRegistry {
    config: RegistryConfig,
    pools: Vec<PairPool>,
    index: BTreeMap<AssetPair, PoolId>,
    revision: u64,
}

impl PairRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            pools: Vec::new(),
            index: BTreeMap::new(),
            revision: 0,
        }
    }

    /// Registry defaults.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers an empty pool for `(x, y)` with the default fee tier.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalAssets`] if `x == y`.
    /// - [`DexError::PairExists`] if the pair, in either order, is registered.
    pub fn create_pair(&mut self, x: AssetId, y: AssetId) -> Result<PoolId> {
        self.create_pair_with_fee(x, y, self.config.default_fee_tier())
    }

    /// Registers an empty pool for `(x, y)` with an explicit fee tier.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalAssets`] if `x == y`.
    /// - [`DexError::PairExists`] if the pair, in either order, is registered.
    /// - [`DexError::InvalidFee`] if the fee is 100% or more.
    pub fn create_pair_with_fee(&mut self, x: AssetId, y: AssetId, fee: FeeTier) -> Result<PoolId> {
        let pair = AssetPair::new(x, y)?;
        let pool = self.build_pool(pair, fee)?;
        self.next_id(0)?;
        let id = self.push(pool);
        info!(%id, %pair, %fee, "pair created");
        Ok(id)
    }

    /// Pool identifier for `(x, y)` in either order.  Never creates.
    #[must_use]
    pub fn get_pair(&self, x: AssetId, y: AssetId) -> Option<PoolId> {
        AssetPair::new(x, y)
            .ok()
            .and_then(|pair| self.index.get(&pair).copied())
    }

    /// Number of registered pairs.
    #[must_use]
    pub fn all_pairs_length(&self) -> usize {
        self.pools.len()
    }

    /// The `index`-th pair in creation order.
    #[must_use]
    pub fn pair_at(&self, index: usize) -> Option<AssetPair> {
        self.pools.get(index).map(|pool| *pool.pair())
    }

    /// Iterates over `(id, pool)` in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (PoolId, &PairPool)> {
        self.pools
            .iter()
            .zip(0u32..)
            .map(|(pool, i)| (PoolId::new(i), pool))
    }

    /// The pool registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn pool(&self, id: PoolId) -> Result<&PairPool> {
        self.pools
            .get(id.index())
            .ok_or(DexError::UnknownPool(id.get()))
    }

    /// Current `(reserve_a, reserve_b)` of pool `id`, canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn get_reserves(&self, id: PoolId) -> Result<(Amount, Amount)> {
        self.pool(id).map(SwapPool::get_reserves)
    }

    /// Resolves `(x, y)` to its pool.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalAssets`] if `x == y`.
    /// - [`DexError::PairNotFound`] if no pool is registered.
    pub fn pool_for(&self, x: AssetId, y: AssetId) -> Result<(PoolId, &PairPool)> {
        let pair = AssetPair::new(x, y)?;
        let id = self.index.get(&pair).copied().ok_or(DexError::PairNotFound)?;
        Ok((id, self.pool(id)?))
    }

    /// Starts a staging area over this registry.
    #[must_use]
    pub fn stage(&self) -> PoolStage<'_> {
        PoolStage::new(self)
    }

    /// Rejects a change set staged against an earlier revision.
    pub(crate) fn ensure_current(&self, staged: &StagedPools) -> Result<()> {
        if staged.revision() != self.revision {
            error!(
                staged = staged.revision(),
                current = self.revision,
                "staged pools are stale"
            );
            return Err(DexError::InvariantViolation("staged pools are stale"));
        }
        Ok(())
    }

    /// Applies staged pool changes.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvariantViolation`] if the registry changed
    /// since the stage was opened.  Nothing is applied in that case.
    pub(crate) fn commit(&mut self, staged: StagedPools) -> Result<()> {
        self.ensure_current(&staged)?;
        let (updated, created) = staged.into_parts();
        for (id, pool) in updated {
            if let Some(slot) = self.pools.get_mut(id.index()) {
                *slot = pool;
            }
        }
        for pool in created {
            let pair = *pool.pair();
            let id = self.push(pool);
            info!(%id, %pair, "pair created");
        }
        self.revision = self.revision.wrapping_add(1);
        Ok(())
    }

    pub(crate) const fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn index_of(&self, pair: &AssetPair) -> Option<PoolId> {
        self.index.get(pair).copied()
    }

    pub(crate) fn build_pool(&self, pair: AssetPair, fee: FeeTier) -> Result<PairPool> {
        if self.index.contains_key(&pair) {
            return Err(DexError::PairExists);
        }
        PairPool::from_config(&PoolConfig::new(pair, fee)?)
    }

    /// Identifier the pool `offset` places after the last registered one
    /// would receive.
    pub(crate) fn next_id(&self, offset: usize) -> Result<PoolId> {
        self.pools
            .len()
            .checked_add(offset)
            .and_then(|n| u32::try_from(n).ok())
            .map(PoolId::new)
            .ok_or(DexError::Overflow("pool id space exhausted"))
    }

    // Ids were range-checked by `next_id` before the pool was built.
    #[allow(clippy::cast_possible_truncation)]
    fn push(&mut self, pool: PairPool) -> PoolId {
        let id = PoolId::new(self.pools.len() as u32);
        self.index.insert(*pool.pair(), id);
        self.pools.push(pool);
        self.revision = self.revision.wrapping_add(1);
        id
    }
}

impl Default for PairRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
