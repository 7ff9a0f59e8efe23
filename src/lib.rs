//! # Hydra DEX
//!
//! Pair-registry AMM exchange engine: constant-product pools, liquidity
//! shares, and multi-hop routing with slippage and deadline protection.
//!
//! The crate is the state-transition and pricing core of a Uniswap V2 style
//! exchange.  Wallets, user interfaces and transport are out of scope; they
//! drive the engine through [`Exchange`](exchange::Exchange) and
//! [`Router`](router::Router) and read back balances and reserves.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize` / `Deserialize` on config and value types |
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_dex::clock::ManualClock;
//! use hydra_dex::config::RouterConfig;
//! use hydra_dex::domain::{AccountId, Amount, AssetId, Route, Timestamp};
//! use hydra_dex::exchange::Exchange;
//! use hydra_dex::router::{AddLiquidity, Router, SwapExactIn};
//!
//! let usdc = AssetId::from_bytes([1u8; 20]);
//! let weth = AssetId::from_bytes([2u8; 20]);
//! let alice = AccountId::from_bytes([0xa1; 20]);
//!
//! // 1. An empty exchange and a router with a controllable clock
//! let mut exchange = Exchange::default();
//! let router = Router::new(RouterConfig::default(), ManualClock::new(Timestamp::from_secs(1_000)));
//!
//! // 2. Fund alice and let the router move her assets
//! for asset in [usdc, weth] {
//!     exchange.mint_asset(asset, alice, Amount::from_whole(1_000_000).expect("fits")).expect("minted");
//!     exchange.approve(asset, alice, router.address(), Amount::MAX);
//! }
//!
//! // 3. Provide liquidity; the pair is created on first use
//! let deadline = Timestamp::from_secs(2_000);
//! let receipt = router
//!     .add_liquidity(&mut exchange, alice, &AddLiquidity {
//!         asset_a: usdc,
//!         asset_b: weth,
//!         amount_a_desired: Amount::from_whole(500).expect("fits"),
//!         amount_b_desired: Amount::from_whole(500).expect("fits"),
//!         amount_a_min: Amount::ZERO,
//!         amount_b_min: Amount::ZERO,
//!         recipient: alice,
//!         deadline,
//!     })
//!     .expect("liquidity added");
//! assert!(!receipt.shares.is_zero());
//!
//! // 4. Swap 10 USDC for WETH
//! let amounts = router
//!     .swap_exact_tokens_for_tokens(&mut exchange, alice, &SwapExactIn {
//!         amount_in: Amount::from_whole(10).expect("fits"),
//!         amount_out_min: Amount::ZERO,
//!         route: Route::direct(usdc, weth).expect("valid route"),
//!         recipient: alice,
//!         deadline,
//!     })
//!     .expect("swap succeeded");
//! assert!(amounts[1] < amounts[0]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller     │  owns an Exchange (or a SharedExchange)
//! └──────┬──────┘
//!        │ add_liquidity / remove_liquidity / swap_*
//!        ▼
//! ┌─────────────┐
//! │   Router     │  deadline, slippage, staging, settlement
//! └──────┬──────┘
//!        │ PoolStage (copy-on-write) + TransferBatch
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  one PairPool per unordered asset pair
//! └──────┬──────┘
//!        │ mint / burn / swap
//!        ▼
//! ┌─────────────┐
//! │  PairPool    │  reserves + share ledger, x * y = k
//! └──────┬──────┘
//!        │ amount_out / amount_in
//!        ▼
//! ┌─────────────┐
//! │ QuoteCalc    │  pure pricing, 256-bit intermediates
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`AssetPair`](domain::AssetPair), [`Route`](domain::Route), events |
//! | [`quote`] | [`QuoteCalculator`](quote::QuoteCalculator) pricing formulas |
//! | [`pools`] | [`PairPool`](pools::PairPool) constant-product pool |
//! | [`registry`] | [`PairRegistry`](registry::PairRegistry) and copy-on-write [`PoolStage`](registry::PoolStage) |
//! | [`ledger`] | [`AssetLedger`](ledger::AssetLedger) balances and allowances |
//! | [`exchange`] | [`Exchange`](exchange::Exchange) state store and [`SharedExchange`](exchange::SharedExchange) |
//! | [`router`] | [`Router`](router::Router) liquidity and swap orchestration |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`FromConfig`](traits::FromConfig), [`Clock`](traits::Clock) |
//! | [`config`] | Validated configuration structs |
//! | [`clock`] | [`SystemClock`](clock::SystemClock) and [`ManualClock`](clock::ManualClock) |
//! | [`math`] | Rounding division and 256-bit helpers |
//! | [`error`] | [`DexError`](error::DexError) with stable reason codes |
//! | [`prelude`] | Convenience re-exports |

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod quote;
pub mod registry;
pub mod router;
pub mod traits;
