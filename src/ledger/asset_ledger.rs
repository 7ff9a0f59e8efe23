//! Balances, allowances, and supply per asset.

use std::collections::BTreeMap;

use tracing::{debug, error, warn};

use super::{PreparedTransfers, TransferBatch};
use crate::domain::{AccountId, Amount, AssetId};
use crate::error::{DexError, Result};
use crate::math::CheckedArithmetic;

/// In-memory fungible asset ledger.
///
/// An allowance of [`Amount::MAX`] is unlimited and is never decreased.
/// Zero balances and zero allowances are not stored.  A
/// [`PreparedTransfers`] is only accepted by the revision it was prepared
/// against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetLedger {
    balances: BTreeMap<(AssetId, AccountId), Amount>,
    allowances: BTreeMap<(AssetId, AccountId, AccountId), Amount>,
    supplies: BTreeMap<AssetId, Amount>,
    #[cfg_attr(feature = "serde", serde(skip))]
    revision: u64,
}

impl AssetLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues `amount` of `asset` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the supply or balance would exceed
    /// `u128::MAX`.
    pub fn mint(&mut self, asset: AssetId, to: AccountId, amount: Amount) -> Result<()> {
        let supply = self
            .total_supply(asset)
            .safe_add(&amount, "asset supply overflow")?;
        let balance = self
            .balance_of(asset, to)
            .safe_add(&amount, "asset balance overflow")?;
        self.supplies.insert(asset, supply);
        self.set_balance(asset, to, balance);
        self.bump();
        debug!(%asset, %to, %amount, "asset minted");
        Ok(())
    }

    /// Balance of `account` in `asset`.
    #[must_use]
    pub fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount {
        self.balances
            .get(&(asset, account))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Total issued supply of `asset`, including what pools hold.
    #[must_use]
    pub fn total_supply(&self, asset: AssetId) -> Amount {
        self.supplies.get(&asset).copied().unwrap_or(Amount::ZERO)
    }

    /// Sum of all account balances of `asset`, excluding pool custody.
    #[must_use]
    pub fn circulating(&self, asset: AssetId) -> Amount {
        self.balances
            .range((asset, AccountId::zero())..)
            .take_while(|((a, _), _)| *a == asset)
            .fold(Amount::ZERO, |acc, (_, amount)| {
                acc.checked_add(amount).unwrap_or(Amount::MAX)
            })
    }

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientBalance`] if `from` holds less than `amount`.
    /// - [`DexError::Overflow`] if the receiver's balance would overflow.
    pub fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        let from_after = self
            .balance_of(asset, from)
            .checked_sub(&amount)
            .ok_or(DexError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_after = self
            .balance_of(asset, to)
            .safe_add(&amount, "asset balance overflow")?;
        self.set_balance(asset, from, from_after);
        self.set_balance(asset, to, to_after);
        self.bump();
        debug!(%asset, %from, %to, %amount, "asset transferred");
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s `asset` to `amount`.
    pub fn approve(&mut self, asset: AssetId, owner: AccountId, spender: AccountId, amount: Amount) {
        self.set_allowance(asset, owner, spender, amount);
        self.bump();
        debug!(%asset, %owner, %spender, %amount, "allowance set");
    }

    /// Amount of `asset` that `spender` may still move for `owner`.
    #[must_use]
    pub fn allowance(&self, asset: AssetId, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&(asset, owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Validates `batch` against current balances and allowances.
    ///
    /// Nothing is modified; the returned [`PreparedTransfers`] carries the
    /// final value of every touched entry and is applied when the exchange
    /// settles the operation.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAllowance`] if a pull exceeds the
    ///   spender's allowance.
    /// - [`DexError::InsufficientBalance`] if a pull exceeds the owner's
    ///   balance.
    /// - [`DexError::Overflow`] if a push would overflow a balance.
    pub fn prepare(&self, batch: &TransferBatch) -> Result<PreparedTransfers> {
        let mut prepared = PreparedTransfers {
            revision: self.revision,
            ..PreparedTransfers::default()
        };
        let spender = batch.spender();

        for &(asset, owner, amount) in batch.pulls() {
            if amount.is_zero() {
                continue;
            }
            if owner != spender {
                let key = (asset, owner, spender);
                let current = prepared
                    .allowances
                    .get(&key)
                    .copied()
                    .unwrap_or_else(|| self.allowance(asset, owner, spender));
                if current != Amount::MAX {
                    let Some(remaining) = current.checked_sub(&amount) else {
                        warn!(%asset, %owner, %spender, %amount, allowance = %current, "allowance too small");
                        return Err(DexError::InsufficientAllowance);
                    };
                    prepared.allowances.insert(key, remaining);
                }
            }
            let key = (asset, owner);
            let current = prepared
                .balances
                .get(&key)
                .copied()
                .unwrap_or_else(|| self.balance_of(asset, owner));
            let Some(remaining) = current.checked_sub(&amount) else {
                warn!(%asset, %owner, %amount, balance = %current, "balance too small");
                return Err(DexError::InsufficientBalance);
            };
            prepared.balances.insert(key, remaining);
        }

        for &(asset, to, amount) in batch.pushes() {
            if amount.is_zero() {
                continue;
            }
            let key = (asset, to);
            let current = prepared
                .balances
                .get(&key)
                .copied()
                .unwrap_or_else(|| self.balance_of(asset, to));
            let credited = current.safe_add(&amount, "asset balance overflow")?;
            prepared.balances.insert(key, credited);
        }

        Ok(prepared)
    }

    /// Rejects a batch prepared against an earlier revision.
    pub(crate) fn ensure_current(&self, prepared: &PreparedTransfers) -> Result<()> {
        if prepared.revision != self.revision {
            error!(
                prepared = prepared.revision,
                current = self.revision,
                "prepared transfers are stale"
            );
            return Err(DexError::InvariantViolation("prepared transfers are stale"));
        }
        Ok(())
    }

    /// Applies a batch validated by [`prepare`](Self::prepare).
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvariantViolation`] if the ledger changed since
    /// the batch was prepared.  Nothing is applied in that case.
    pub(crate) fn commit(&mut self, prepared: PreparedTransfers) -> Result<()> {
        self.ensure_current(&prepared)?;
        for ((asset, account), amount) in prepared.balances {
            self.set_balance(asset, account, amount);
        }
        for ((asset, owner, spender), amount) in prepared.allowances {
            self.set_allowance(asset, owner, spender, amount);
        }
        self.bump();
        Ok(())
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn set_balance(&mut self, asset: AssetId, account: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(asset, account));
        } else {
            self.balances.insert((asset, account), amount);
        }
    }

    fn set_allowance(&mut self, asset: AssetId, owner: AccountId, spender: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(asset, owner, spender));
        } else {
            self.allowances.insert((asset, owner, spender), amount);
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn asset(b: u8) -> AssetId {
        AssetId::from_bytes([b; 20])
    }

    fn account(b: u8) -> AccountId {
        AccountId::from_bytes([b; 20])
    }

    fn funded() -> AssetLedger {
        let mut ledger = AssetLedger::new();
        let Ok(()) = ledger.mint(asset(1), account(0xa1), Amount::new(1_000)) else {
            panic!("mint failed");
        };
        let Ok(()) = ledger.mint(asset(2), account(0xa1), Amount::new(500)) else {
            panic!("mint failed");
        };
        ledger
    }

    // -- mint / transfer ------------------------------------------------------

    #[test]
    fn mint_tracks_supply() {
        let ledger = funded();
        assert_eq!(ledger.total_supply(asset(1)), Amount::new(1_000));
        assert_eq!(ledger.balance_of(asset(1), account(0xa1)), Amount::new(1_000));
        assert_eq!(ledger.balance_of(asset(1), account(0xb2)), Amount::ZERO);
        assert_eq!(ledger.circulating(asset(1)), Amount::new(1_000));
        assert_eq!(ledger.circulating(asset(3)), Amount::ZERO);
    }

    #[test]
    fn mint_overflow_rejected() {
        let mut ledger = funded();
        assert!(matches!(
            ledger.mint(asset(1), account(0xb2), Amount::MAX),
            Err(DexError::Overflow(_))
        ));
        assert_eq!(ledger.total_supply(asset(1)), Amount::new(1_000));
    }

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = funded();
        let Ok(()) = ledger.transfer(asset(1), account(0xa1), account(0xb2), Amount::new(300)) else {
            panic!("transfer failed");
        };
        assert_eq!(ledger.balance_of(asset(1), account(0xa1)), Amount::new(700));
        assert_eq!(ledger.balance_of(asset(1), account(0xb2)), Amount::new(300));
        assert_eq!(ledger.circulating(asset(1)), Amount::new(1_000));
    }

    #[test]
    fn transfer_over_balance_rejected() {
        let mut ledger = funded();
        assert_eq!(
            ledger.transfer(asset(2), account(0xa1), account(0xb2), Amount::new(501)),
            Err(DexError::InsufficientBalance)
        );
        assert_eq!(ledger.balance_of(asset(2), account(0xa1)), Amount::new(500));
    }

    // -- allowances -----------------------------------------------------------

    #[test]
    fn approve_overwrites() {
        let mut ledger = funded();
        ledger.approve(asset(1), account(0xa1), account(0xee), Amount::new(10));
        ledger.approve(asset(1), account(0xa1), account(0xee), Amount::new(4));
        assert_eq!(
            ledger.allowance(asset(1), account(0xa1), account(0xee)),
            Amount::new(4)
        );
        assert_eq!(
            ledger.allowance(asset(2), account(0xa1), account(0xee)),
            Amount::ZERO
        );
    }

    // -- batches --------------------------------------------------------------

    #[test]
    fn batch_applies_pulls_and_pushes() {
        let mut ledger = funded();
        ledger.approve(asset(1), account(0xa1), account(0xee), Amount::new(600));

        let mut batch = TransferBatch::new(account(0xee));
        batch
            .pull(asset(1), account(0xa1), Amount::new(250))
            .pull(asset(1), account(0xa1), Amount::new(250))
            .push(asset(2), account(0xb2), Amount::new(40));
        let Ok(prepared) = ledger.prepare(&batch) else {
            panic!("prepare failed");
        };
        assert_eq!(ledger.commit(prepared), Ok(()));

        assert_eq!(ledger.balance_of(asset(1), account(0xa1)), Amount::new(500));
        assert_eq!(
            ledger.allowance(asset(1), account(0xa1), account(0xee)),
            Amount::new(100)
        );
        assert_eq!(ledger.balance_of(asset(2), account(0xb2)), Amount::new(40));
    }

    #[test]
    fn allowance_checked_across_whole_batch() {
        let mut ledger = funded();
        ledger.approve(asset(1), account(0xa1), account(0xee), Amount::new(300));
        let mut batch = TransferBatch::new(account(0xee));
        batch
            .pull(asset(1), account(0xa1), Amount::new(200))
            .pull(asset(1), account(0xa1), Amount::new(200));
        assert_eq!(ledger.prepare(&batch), Err(DexError::InsufficientAllowance));
    }

    #[test]
    fn balance_checked_after_allowance() {
        let mut ledger = funded();
        ledger.approve(asset(2), account(0xa1), account(0xee), Amount::MAX);
        let mut batch = TransferBatch::new(account(0xee));
        batch.pull(asset(2), account(0xa1), Amount::new(501));
        assert_eq!(ledger.prepare(&batch), Err(DexError::InsufficientBalance));
    }

    #[test]
    fn unlimited_allowance_not_spent() {
        let mut ledger = funded();
        ledger.approve(asset(1), account(0xa1), account(0xee), Amount::MAX);
        let mut batch = TransferBatch::new(account(0xee));
        batch.pull(asset(1), account(0xa1), Amount::new(999));
        let Ok(prepared) = ledger.prepare(&batch) else {
            panic!("prepare failed");
        };
        assert_eq!(ledger.commit(prepared), Ok(()));
        assert_eq!(
            ledger.allowance(asset(1), account(0xa1), account(0xee)),
            Amount::MAX
        );
        assert_eq!(ledger.balance_of(asset(1), account(0xa1)), Amount::new(1));
    }

    #[test]
    fn owner_pulling_own_assets_needs_no_allowance() {
        let mut ledger = funded();
        let mut batch = TransferBatch::new(account(0xa1));
        batch.pull(asset(1), account(0xa1), Amount::new(10));
        let Ok(prepared) = ledger.prepare(&batch) else {
            panic!("prepare failed");
        };
        assert_eq!(ledger.commit(prepared), Ok(()));
        assert_eq!(ledger.balance_of(asset(1), account(0xa1)), Amount::new(990));
    }

    #[test]
    fn failed_prepare_leaves_ledger_untouched() {
        let ledger = funded();
        let before = ledger.clone();
        let mut batch = TransferBatch::new(account(0xee));
        batch.pull(asset(1), account(0xa1), Amount::new(1));
        assert!(ledger.prepare(&batch).is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn zero_amounts_are_skipped() {
        let ledger = funded();
        let mut batch = TransferBatch::new(account(0xee));
        batch
            .pull(asset(1), account(0xa1), Amount::ZERO)
            .push(asset(1), account(0xb2), Amount::ZERO);
        let Ok(prepared) = ledger.prepare(&batch) else {
            panic!("prepare failed");
        };
        assert!(prepared.is_empty());
    }

    #[test]
    fn stale_batch_rejected() {
        let mut ledger = funded();
        ledger.approve(asset(1), account(0xa1), account(0xee), Amount::MAX);
        let mut batch = TransferBatch::new(account(0xee));
        batch.pull(asset(1), account(0xa1), Amount::new(600));
        let Ok(stale) = ledger.prepare(&batch) else {
            panic!("prepare failed");
        };
        let Ok(fresh) = ledger.prepare(&batch) else {
            panic!("prepare failed");
        };

        assert_eq!(ledger.commit(fresh), Ok(()));
        let before = ledger.clone();
        assert!(matches!(
            ledger.commit(stale),
            Err(DexError::InvariantViolation(_))
        ));
        assert_eq!(ledger, before);
        assert_eq!(ledger.balance_of(asset(1), account(0xa1)), Amount::new(400));
    }

    #[test]
    fn direct_mutation_invalidates_prepared_batch() {
        let mut ledger = funded();
        let mut batch = TransferBatch::new(account(0xa1));
        batch.pull(asset(1), account(0xa1), Amount::new(100));
        let Ok(prepared) = ledger.prepare(&batch) else {
            panic!("prepare failed");
        };
        let Ok(()) = ledger.transfer(asset(1), account(0xa1), account(0xb2), Amount::new(900)) else {
            panic!("transfer failed");
        };
        assert!(ledger.commit(prepared).is_err());
        assert_eq!(ledger.balance_of(asset(1), account(0xa1)), Amount::new(100));
    }
}
