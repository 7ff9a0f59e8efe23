//! Declarative, validated configuration.
//!
//! Every struct validates itself in `new` and again through `validate`,
//! so a value obtained from deserialization can be checked before use.

mod exchange;
mod pool;
mod registry;
mod router;

pub use exchange::ExchangeConfig;
pub use pool::PoolConfig;
pub use registry::RegistryConfig;
pub use router::RouterConfig;
