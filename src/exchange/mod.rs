//! The injectable state store shared by every router call.
//!
//! [`Exchange`] owns the pair registry, the asset ledger, and the event
//! journal.  It is passed by reference into the
//! [`Router`](crate::router::Router), never held as ambient global state.
//! [`SharedExchange`] serializes access from several threads.

mod shared;
mod state;

pub use shared::SharedExchange;
pub use state::Exchange;
