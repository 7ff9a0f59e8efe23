//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_dex::prelude::*;
//! ```

pub use crate::clock::{ManualClock, SystemClock};
pub use crate::config::{ExchangeConfig, PoolConfig, RegistryConfig, RouterConfig};
pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BasisPoints, BurnReceipt, DexEvent, FeeTier,
    MintReceipt, PoolId, Rounding, Route, Shares, SwapResult, Timestamp,
};
pub use crate::error::{DexError, ErrorKind, Result};
pub use crate::exchange::{Exchange, SharedExchange};
pub use crate::math::CheckedArithmetic;
pub use crate::pools::PairPool;
pub use crate::quote::QuoteCalculator;
pub use crate::router::{AddLiquidity, RemoveLiquidity, Router, SwapExactIn, SwapExactOut};
pub use crate::traits::{Clock, FromConfig, LiquidityPool, SwapPool};
