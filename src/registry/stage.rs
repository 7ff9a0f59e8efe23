//! Copy-on-write staging of pool mutations.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::PairRegistry;
use crate::domain::{AssetId, AssetPair, FeeTier, PoolId};
use crate::error::{DexError, Result};
use crate::pools::PairPool;
use crate::traits::SwapPool;

/// A private working copy over a [`PairRegistry`].
///
/// The first mutable access to a registered pool clones it into the stage;
/// later accesses see the staged copy, so a multi-hop route that revisits a
/// pool is priced against its already-updated reserves.  Pairs created
/// through the stage receive the identifiers they will have after commit.
///
/// Dropping a stage discards everything.  [`PoolStage::into_changes`]
/// releases the registry borrow and yields the [`StagedPools`] to commit.
#[derive(Debug)]
pub struct PoolStage<'r> {
    registry: &'r PairRegistry,
    touched: BTreeMap<PoolId, PairPool>,
    created: Vec<PairPool>,
}

impl<'r> PoolStage<'r> {
    pub(crate) fn new(registry: &'r PairRegistry) -> Self {
        Self {
            registry,
            touched: BTreeMap::new(),
            created: Vec::new(),
        }
    }

    /// The staged view of pool `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn pool(&self, id: PoolId) -> Result<&PairPool> {
        let base = self.registry.all_pairs_length();
        if id.index() >= base {
            return self
                .created
                .get(id.index() - base)
                .ok_or(DexError::UnknownPool(id.get()));
        }
        match self.touched.get(&id) {
            Some(pool) => Ok(pool),
            None => self.registry.pool(id),
        }
    }

    /// Mutable staged copy of pool `id`, cloned on first access.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownPool`] for an unassigned identifier.
    pub fn pool_mut(&mut self, id: PoolId) -> Result<&mut PairPool> {
        let base = self.registry.all_pairs_length();
        if id.index() >= base {
            return self
                .created
                .get_mut(id.index() - base)
                .ok_or(DexError::UnknownPool(id.get()));
        }
        match self.touched.entry(id) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => {
                let pool = self.registry.pool(id)?.clone();
                Ok(slot.insert(pool))
            }
        }
    }

    /// Pool identifier for `(x, y)`, including pairs created in this stage.
    #[must_use]
    pub fn get_pair(&self, x: AssetId, y: AssetId) -> Option<PoolId> {
        let pair = AssetPair::new(x, y).ok()?;
        self.find(&pair)
    }

    /// Resolves `(x, y)` to a pool identifier.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalAssets`] if `x == y`.
    /// - [`DexError::PairNotFound`] if neither the registry nor the stage
    ///   holds the pair.
    pub fn resolve(&self, x: AssetId, y: AssetId) -> Result<PoolId> {
        let pair = AssetPair::new(x, y)?;
        self.find(&pair).ok_or(DexError::PairNotFound)
    }

    /// Stages a new empty pool for `(x, y)`.
    ///
    /// # Errors
    ///
    /// Same as [`PairRegistry::create_pair_with_fee`], with staged pairs
    /// counting as registered.
    pub fn create_pair(&mut self, x: AssetId, y: AssetId, fee: FeeTier) -> Result<PoolId> {
        let pair = AssetPair::new(x, y)?;
        if self.find(&pair).is_some() {
            return Err(DexError::PairExists);
        }
        let pool = self.registry.build_pool(pair, fee)?;
        let id = self.registry.next_id(self.created.len())?;
        self.created.push(pool);
        Ok(id)
    }

    /// Finishes staging.
    #[must_use]
    pub fn into_changes(self) -> StagedPools {
        StagedPools {
            revision: self.registry.revision(),
            updated: self.touched,
            created: self.created,
        }
    }

    fn find(&self, pair: &AssetPair) -> Option<PoolId> {
        if let Some(id) = self.registry.index_of(pair) {
            return Some(id);
        }
        self.created
            .iter()
            .position(|pool| pool.pair() == pair)
            .and_then(|offset| self.registry.next_id(offset).ok())
    }
}

/// Pool changes detached from their stage, tagged with the registry
/// revision they were staged against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedPools {
    revision: u64,
    updated: BTreeMap<PoolId, PairPool>,
    created: Vec<PairPool>,
}

impl StagedPools {
    /// Returns `true` if nothing was touched or created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.created.is_empty()
    }

    /// Number of pairs this change set registers.
    #[must_use]
    pub fn created_len(&self) -> usize {
        self.created.len()
    }

    pub(crate) const fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<PoolId, PairPool>, Vec<PairPool>) {
        (self.updated, self.created)
    }
}
