//! End-to-end walkthrough of the exchange engine.
//!
//! Funds two accounts, provides liquidity through the router (creating the
//! pair lazily), quotes and executes swaps, and withdraws liquidity after
//! approving the router for pool shares.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=hydra_dex=debug cargo run --example walkthrough
//! ```

use hydra_dex::clock::SystemClock;
use hydra_dex::config::ExchangeConfig;
use hydra_dex::domain::{AccountId, Amount, AssetId, Route, Timestamp};
use hydra_dex::exchange::Exchange;
use hydra_dex::router::{AddLiquidity, RemoveLiquidity, Router, SwapExactIn};
use hydra_dex::traits::{Clock, FromConfig};

fn ether(whole: u128) -> Result<Amount, &'static str> {
    Amount::from_whole(whole).ok_or("amount overflow")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Hydra DEX walkthrough ===\n");

    // ── 1. Exchange, router, and assets ─────────────────────────────────
    let config = ExchangeConfig::default();
    let mut exchange = Exchange::from_config(&config)?;
    let router = Router::<SystemClock>::from_config(config.router())?;

    let token_a = AssetId::from_bytes([0x0a; 20]);
    let token_b = AssetId::from_bytes([0x0b; 20]);
    let owner = AccountId::from_bytes([0x01; 20]);
    let trader = AccountId::from_bytes([0x02; 20]);

    for token in [token_a, token_b] {
        for account in [owner, trader] {
            exchange.mint_asset(token, account, ether(1_000_000)?)?;
            exchange.approve(token, account, router.address(), ether(10_000)?);
        }
    }
    println!("Funded owner and trader with 1 000 000 of each token");

    let deadline: Timestamp = router.clock().now().saturating_add(20 * 60);

    // ── 2. Provide liquidity ────────────────────────────────────────────
    let minted = router.add_liquidity(
        &mut exchange,
        owner,
        &AddLiquidity {
            asset_a: token_a,
            asset_b: token_b,
            amount_a_desired: ether(100)?,
            amount_b_desired: ether(100)?,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            recipient: owner,
            deadline,
        },
    )?;
    let pool = exchange.get_pair(token_a, token_b).ok_or("pair not created")?;
    println!(
        "Added liquidity: {} A + {} B -> {} shares ({pool}, {} pair(s))",
        minted.amount_a,
        minted.amount_b,
        minted.shares,
        exchange.all_pairs_length()
    );

    // ── 3. Quote and swap ───────────────────────────────────────────────
    let route = Route::direct(token_a, token_b)?;
    let quoted = router.get_amounts_out(&exchange, ether(10)?, &route)?;
    println!("Quote: {} A -> {} B", quoted[0], quoted[1]);

    let executed = router.swap_exact_tokens_for_tokens(
        &mut exchange,
        trader,
        &SwapExactIn {
            amount_in: ether(10)?,
            amount_out_min: quoted[1],
            route: route.clone(),
            recipient: trader,
            deadline,
        },
    )?;
    let (reserve_a, reserve_b) = exchange.get_reserves(pool)?;
    println!("Swapped: {} A -> {} B", executed[0], executed[1]);
    println!("Reserves now: {reserve_a} A / {reserve_b} B");

    // A second identical swap demanding twice the output is refused.
    let greedy = executed[1].checked_mul(&Amount::new(2)).ok_or("overflow")?;
    match router.swap_exact_tokens_for_tokens(
        &mut exchange,
        trader,
        &SwapExactIn {
            amount_in: ether(10)?,
            amount_out_min: greedy,
            route,
            recipient: trader,
            deadline,
        },
    ) {
        Ok(_) => println!("Unexpected: greedy swap accepted"),
        Err(err) => println!("Greedy swap rejected: {} ({})", err.code(), err),
    }

    // ── 4. Withdraw ─────────────────────────────────────────────────────
    exchange.approve_shares(pool, owner, router.address(), minted.shares)?;
    let burned = router.remove_liquidity(
        &mut exchange,
        owner,
        &RemoveLiquidity {
            asset_a: token_a,
            asset_b: token_b,
            shares: minted.shares,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            recipient: owner,
            deadline,
        },
    )?;
    println!(
        "Removed liquidity: {} A + {} B",
        burned.amount_a, burned.amount_b
    );

    // ── 5. Journal ──────────────────────────────────────────────────────
    for token in [token_a, token_b] {
        exchange.check_conservation(token)?;
    }
    println!("\n{} events recorded:", exchange.events().len());
    for event in exchange.events() {
        println!("  {event:?}");
    }

    Ok(())
}
