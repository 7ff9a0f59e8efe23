//! Pair registry and copy-on-write pool staging.
//!
//! [`PairRegistry`] maps each unordered asset pair to exactly one
//! [`PairPool`](crate::pools::PairPool) and enumerates pairs in creation
//! order.  [`PoolStage`] lets a multi-step operation mutate private copies
//! of the pools it touches (and stage new pairs) so that the registry is
//! updated only once the whole operation has succeeded.

mod pair_registry;
mod stage;

pub use pair_registry::PairRegistry;
pub use stage::{PoolStage, StagedPools};
