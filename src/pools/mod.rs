//! Pool implementations.
//!
//! | Pool | Style |
//! |------|-------|
//! | [`PairPool`] | Uniswap V2 constant product with an embedded share ledger |

mod pair_pool;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use pair_pool::PairPool;
