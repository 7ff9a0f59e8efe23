//! Parameters of the router's mutating operations.

use crate::domain::{AccountId, Amount, AssetId, Route, Shares, Timestamp};

/// Deposit into the `(asset_a, asset_b)` pool, creating it if needed.
///
/// Amounts are in the caller's asset order, not canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddLiquidity {
    /// First asset, as the caller names it.
    pub asset_a: AssetId,
    /// Second asset.
    pub asset_b: AssetId,
    /// Most of `asset_a` the caller will deposit.
    pub amount_a_desired: Amount,
    /// Most of `asset_b` the caller will deposit.
    pub amount_b_desired: Amount,
    /// Least of `asset_a` that must be deposited.
    pub amount_a_min: Amount,
    /// Least of `asset_b` that must be deposited.
    pub amount_b_min: Amount,
    /// Receiver of the minted shares.
    pub recipient: AccountId,
    /// Last second at which the deposit may execute.
    pub deadline: Timestamp,
}

/// Burn shares of the `(asset_a, asset_b)` pool for its assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveLiquidity {
    /// First asset, as the caller names it.
    pub asset_a: AssetId,
    /// Second asset.
    pub asset_b: AssetId,
    /// Shares to burn from the caller's balance.
    pub shares: Shares,
    /// Least of `asset_a` to receive.
    pub amount_a_min: Amount,
    /// Least of `asset_b` to receive.
    pub amount_b_min: Amount,
    /// Receiver of the released assets.
    pub recipient: AccountId,
    /// Last second at which the withdrawal may execute.
    pub deadline: Timestamp,
}

/// Sell exactly `amount_in` of the route's first asset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapExactIn {
    /// Input paid by the caller.
    pub amount_in: Amount,
    /// Least final output accepted.
    pub amount_out_min: Amount,
    /// Assets traded through, first to last.
    pub route: Route,
    /// Receiver of the final output.
    pub recipient: AccountId,
    /// Last second at which the swap may execute.
    pub deadline: Timestamp,
}

/// Buy at least `amount_out` of the route's last asset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapExactOut {
    /// Output the caller wants.
    pub amount_out: Amount,
    /// Most input the caller will pay.
    pub amount_in_max: Amount,
    /// Assets traded through, first to last.
    pub route: Route,
    /// Receiver of the final output.
    pub recipient: AccountId,
    /// Last second at which the swap may execute.
    pub deadline: Timestamp,
}
