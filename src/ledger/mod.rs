//! Fungible asset balances held outside the pools.
//!
//! [`AssetLedger`] tracks per-account balances, allowances, and total
//! supply for every asset.  Pool reserves live on the pools themselves; an
//! asset is conserved when its supply equals the sum of account balances
//! plus every pool reserve of that asset.
//!
//! Settlement of a router operation goes through a [`TransferBatch`]: the
//! whole batch is validated by [`AssetLedger::prepare`] and applied when the
//! exchange settles the operation.  A prepared batch is rejected if the
//! ledger changed after it was prepared.

mod asset_ledger;
mod batch;

pub use asset_ledger::AssetLedger;
pub use batch::{PreparedTransfers, TransferBatch};
