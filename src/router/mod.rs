//! Multi-pool orchestration with slippage and deadline protection.
//!
//! Every mutating [`Router`] operation follows the same transaction shape:
//!
//! 1. reject if the clock is past the caller's deadline
//! 2. stage copies of the touched pools and apply the pool operations
//! 3. check caller bounds on the staged results
//! 4. validate the asset movements as one [`TransferBatch`](crate::ledger::TransferBatch)
//! 5. commit pools, balances, and events together
//!
//! Any failure before step 5 discards the stage, so nothing is retained.

mod requests;
mod swap_router;

pub use requests::{AddLiquidity, RemoveLiquidity, SwapExactIn, SwapExactOut};
pub use swap_router::Router;
