//! Stateless pricing for constant-product pools.
//!
//! [`QuoteCalculator`] computes swap outputs and required inputs from a
//! pair of reserves and a fee tier, and chains them along multi-hop
//! routes.  Nothing here touches pool state; pools and the router call
//! into it for every price they commit to.

mod calculator;

pub use calculator::{HopReserves, QuoteCalculator};
