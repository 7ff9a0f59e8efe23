//! Journal of committed state transitions.

use super::{AccountId, Amount, AssetId, AssetPair, PoolId, Shares};

/// One committed state transition.
///
/// Events are appended only after the operation that produced them has
/// fully committed; a failed operation leaves no trace in the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DexEvent {
    /// A new pool was registered.
    PairCreated {
        /// Identifier of the new pool.
        pool: PoolId,
        /// Canonical pair.
        pair: AssetPair,
        /// Number of pairs after creation.
        all_pairs_length: usize,
    },
    /// Liquidity was deposited.
    Mint {
        /// Pool receiving the deposit.
        pool: PoolId,
        /// Account that supplied the assets.
        sender: AccountId,
        /// Account credited with the shares.
        recipient: AccountId,
        /// First-asset amount consumed.
        amount_a: Amount,
        /// Second-asset amount consumed.
        amount_b: Amount,
        /// Shares minted.
        shares: Shares,
    },
    /// Liquidity was withdrawn.
    Burn {
        /// Pool the shares were burned in.
        pool: PoolId,
        /// Share owner.
        owner: AccountId,
        /// Account receiving the assets.
        recipient: AccountId,
        /// First-asset amount released.
        amount_a: Amount,
        /// Second-asset amount released.
        amount_b: Amount,
        /// Shares burned.
        shares: Shares,
    },
    /// One pool hop of a swap.
    Swap {
        /// Pool traded against.
        pool: PoolId,
        /// Asset paid in.
        asset_in: AssetId,
        /// Asset paid out.
        asset_out: AssetId,
        /// Input amount.
        amount_in: Amount,
        /// Output amount.
        amount_out: Amount,
        /// Account that initiated the swap.
        sender: AccountId,
    },
    /// An allowance was set on an asset or on pool shares.
    Approval {
        /// The asset, or `None` for pool shares.
        asset: Option<AssetId>,
        /// The pool, for share approvals.
        pool: Option<PoolId>,
        /// Owner granting the allowance.
        owner: AccountId,
        /// Spender receiving it.
        spender: AccountId,
        /// New allowance.
        amount: u128,
    },
    /// Assets or shares moved between accounts outside a pool operation.
    Transfer {
        /// The asset, or `None` for pool shares.
        asset: Option<AssetId>,
        /// The pool, for share transfers.
        pool: Option<PoolId>,
        /// Sender.
        from: AccountId,
        /// Receiver.
        to: AccountId,
        /// Amount moved.
        amount: u128,
    },
}

impl DexEvent {
    /// The pool this event concerns, if any.
    #[must_use]
    pub const fn pool(&self) -> Option<PoolId> {
        match self {
            Self::PairCreated { pool, .. }
            | Self::Mint { pool, .. }
            | Self::Burn { pool, .. }
            | Self::Swap { pool, .. } => Some(*pool),
            Self::Approval { pool, .. } | Self::Transfer { pool, .. } => *pool,
        }
    }
}
