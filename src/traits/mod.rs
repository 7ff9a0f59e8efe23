//! Trait seams between pools, their construction, and time.
//!
//! - [`SwapPool`]: execute and price swaps.
//! - [`LiquidityPool`]: issue and redeem liquidity shares.
//! - [`FromConfig`]: validated construction.
//! - [`Clock`]: injected time source for deadlines.

mod clock;
mod from_config;
mod liquidity_pool;
mod swap_pool;

pub use clock::Clock;
pub use from_config::FromConfig;
pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
