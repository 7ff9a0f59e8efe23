//! Batched movements between accounts and pool custody.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, AssetId};

/// Transfers settled together for a single operation.
///
/// A *pull* moves `amount` of `asset` from `owner` into pool custody and
/// spends `spender`'s allowance unless `owner` is the spender.  A *push*
/// releases `amount` from pool custody to an account.  Pulls are applied
/// before pushes.
///
/// ```
/// use hydra_dex::domain::{AccountId, Amount, AssetId};
/// use hydra_dex::ledger::{AssetLedger, TransferBatch};
///
/// let asset = AssetId::from_bytes([1u8; 20]);
/// let alice = AccountId::from_bytes([0xa1; 20]);
/// let router = AccountId::from_bytes([0xee; 20]);
///
/// let mut ledger = AssetLedger::new();
/// ledger.mint(asset, alice, Amount::new(100)).expect("minted");
/// ledger.approve(asset, alice, router, Amount::new(40));
///
/// let mut batch = TransferBatch::new(router);
/// batch.pull(asset, alice, Amount::new(30));
/// let prepared = ledger.prepare(&batch).expect("covered");
/// assert!(!prepared.is_empty());
/// assert_eq!(ledger.balance_of(asset, alice), Amount::new(100));
///
/// batch.pull(asset, alice, Amount::new(30));
/// assert!(ledger.prepare(&batch).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferBatch {
    spender: AccountId,
    pulls: Vec<(AssetId, AccountId, Amount)>,
    pushes: Vec<(AssetId, AccountId, Amount)>,
}

impl TransferBatch {
    /// Creates an empty batch executed on behalf of `spender`.
    #[must_use]
    pub const fn new(spender: AccountId) -> Self {
        Self {
            spender,
            pulls: Vec::new(),
            pushes: Vec::new(),
        }
    }

    /// Queues a movement from `owner` into pool custody.
    pub fn pull(&mut self, asset: AssetId, owner: AccountId, amount: Amount) -> &mut Self {
        self.pulls.push((asset, owner, amount));
        self
    }

    /// Queues a release from pool custody to `to`.
    pub fn push(&mut self, asset: AssetId, to: AccountId, amount: Amount) -> &mut Self {
        self.pushes.push((asset, to, amount));
        self
    }

    /// The account moving assets on the owners' behalf.
    #[must_use]
    pub const fn spender(&self) -> AccountId {
        self.spender
    }

    /// Queued pulls as `(asset, owner, amount)`.
    #[must_use]
    pub fn pulls(&self) -> &[(AssetId, AccountId, Amount)] {
        &self.pulls
    }

    /// Queued pushes as `(asset, to, amount)`.
    #[must_use]
    pub fn pushes(&self) -> &[(AssetId, AccountId, Amount)] {
        &self.pushes
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pulls.is_empty() && self.pushes.is_empty()
    }
}

/// A validated batch: the final balance and allowance of every entry the
/// batch touches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedTransfers {
    pub(super) balances: BTreeMap<(AssetId, AccountId), Amount>,
    pub(super) allowances: BTreeMap<(AssetId, AccountId, AccountId), Amount>,
    pub(super) revision: u64,
}

impl PreparedTransfers {
    /// Returns `true` if committing would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty() && self.allowances.is_empty()
    }
}
