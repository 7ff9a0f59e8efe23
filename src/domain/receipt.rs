//! Receipts returned by liquidity operations.

use super::{Amount, Shares};

/// Result of depositing liquidity: the amounts actually consumed and the
/// shares minted for them.
///
/// Amounts follow the asset order of the call that produced the receipt:
/// canonical order from a pool, the caller's order from the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MintReceipt {
    /// Amount of the first asset consumed.
    pub amount_a: Amount,
    /// Amount of the second asset consumed.
    pub amount_b: Amount,
    /// Shares credited to the recipient.
    pub shares: Shares,
}

/// Result of burning shares: the amounts paid out, ordered like
/// [`MintReceipt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BurnReceipt {
    /// Amount of the first asset released.
    pub amount_a: Amount,
    /// Amount of the second asset released.
    pub amount_b: Amount,
}

impl MintReceipt {
    /// Swaps the two asset amounts.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self {
            amount_a: self.amount_b,
            amount_b: self.amount_a,
            shares: self.shares,
        }
    }
}

impl BurnReceipt {
    /// Swaps the two asset amounts.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self {
            amount_a: self.amount_b,
            amount_b: self.amount_a,
        }
    }
}
