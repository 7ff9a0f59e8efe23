//! Domain value types.
//!
//! Newtypes with validated constructors for assets, accounts, amounts,
//! shares, fees, routes and the receipts and events produced by the
//! exchange.  Every amount is an 18-decimal fixed-point integer.

mod address;
mod amount;
mod asset_pair;
mod basis_points;
mod event;
mod fee_tier;
mod pool_id;
mod receipt;
mod rounding;
mod route;
mod shares;
mod swap_result;
mod timestamp;

pub use address::{AccountId, AssetId, ADDRESS_LEN};
pub use amount::{Amount, DECIMALS};
pub use asset_pair::AssetPair;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use event::DexEvent;
pub use fee_tier::FeeTier;
pub use pool_id::PoolId;
pub use receipt::{BurnReceipt, MintReceipt};
pub use rounding::Rounding;
pub use route::Route;
pub use shares::Shares;
pub use swap_result::SwapResult;
pub use timestamp::Timestamp;
