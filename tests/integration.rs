//! Integration tests exercising the full system through the public API:
//! pair registration, liquidity provision and withdrawal, single and
//! multi-hop swaps, deadlines, and serialized shared access.

#![allow(clippy::panic)]

use std::thread;

use hydra_dex::clock::ManualClock;
use hydra_dex::config::RouterConfig;
use hydra_dex::domain::{AccountId, Amount, AssetId, DexEvent, FeeTier, Route, Shares, Timestamp};
use hydra_dex::error::{DexError, ErrorKind};
use hydra_dex::exchange::{Exchange, SharedExchange};
use hydra_dex::quote::QuoteCalculator;
use hydra_dex::router::{AddLiquidity, RemoveLiquidity, Router, SwapExactIn, SwapExactOut};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const START: u64 = 1_700_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn token_a() -> AssetId {
    AssetId::from_bytes([0x0a; 20])
}

fn token_b() -> AssetId {
    AssetId::from_bytes([0x0b; 20])
}

fn token_c() -> AssetId {
    AssetId::from_bytes([0x0c; 20])
}

fn owner() -> AccountId {
    AccountId::from_bytes([0x01; 20])
}

fn trader() -> AccountId {
    AccountId::from_bytes([0x02; 20])
}

fn ether(whole: u128) -> Amount {
    let Some(amount) = Amount::from_whole(whole) else {
        panic!("amount overflow");
    };
    amount
}

fn router() -> Router<ManualClock> {
    let Ok(config) = RouterConfig::new(AccountId::from_bytes([0xee; 20])) else {
        panic!("valid router config");
    };
    Router::new(config, ManualClock::new(Timestamp::from_secs(START)))
}

fn deadline() -> Timestamp {
    Timestamp::from_secs(START + 1_200)
}

/// Mints 1 000 000 of each token to `owner` and `trader`, each approving
/// the router for `allowance`.
fn funded_exchange(router: &Router<ManualClock>, allowance: Amount) -> Exchange {
    init_tracing();
    let mut exchange = Exchange::default();
    for token in [token_a(), token_b(), token_c()] {
        for account in [owner(), trader()] {
            let Ok(()) = exchange.mint_asset(token, account, ether(1_000_000)) else {
                panic!("mint failed");
            };
            exchange.approve(token, account, router.address(), allowance);
        }
    }
    exchange
}

fn add_request(x: AssetId, y: AssetId, amount_x: Amount, amount_y: Amount) -> AddLiquidity {
    AddLiquidity {
        asset_a: x,
        asset_b: y,
        amount_a_desired: amount_x,
        amount_b_desired: amount_y,
        amount_a_min: Amount::ZERO,
        amount_b_min: Amount::ZERO,
        recipient: owner(),
        deadline: deadline(),
    }
}

fn direct(x: AssetId, y: AssetId) -> Route {
    let Ok(route) = Route::direct(x, y) else {
        panic!("valid route");
    };
    route
}

fn sell(amount_in: Amount, amount_out_min: Amount, route: Route) -> SwapExactIn {
    SwapExactIn {
        amount_in,
        amount_out_min,
        route,
        recipient: trader(),
        deadline: deadline(),
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn duplicate_pair_fails_in_either_order() {
    let mut exchange = Exchange::default();
    let Ok(id) = exchange.create_pair(token_a(), token_b()) else {
        panic!("first create failed");
    };
    for (x, y) in [(token_a(), token_b()), (token_b(), token_a())] {
        let Err(err) = exchange.create_pair(x, y) else {
            panic!("duplicate accepted");
        };
        assert_eq!(err, DexError::PairExists);
        assert_eq!(err.code(), "PAIR_EXISTS");
        assert_eq!(err.kind(), ErrorKind::State);
    }
    assert_eq!(exchange.all_pairs_length(), 1);
    assert_eq!(exchange.get_pair(token_b(), token_a()), Some(id));
    assert_eq!(exchange.get_pair(token_a(), token_c()), None);
}

#[test]
fn fresh_pair_is_empty() {
    let mut exchange = Exchange::default();
    let Ok(id) = exchange.create_pair(token_b(), token_a()) else {
        panic!("create failed");
    };
    assert_eq!(exchange.get_reserves(id), Ok((Amount::ZERO, Amount::ZERO)));
    assert_eq!(exchange.total_shares(id), Ok(Shares::ZERO));
}

// ---------------------------------------------------------------------------
// 500 / 500 scenario
// ---------------------------------------------------------------------------

#[test]
fn small_pool_swap_and_slippage_guard() {
    let router = router();
    let mut exchange = funded_exchange(&router, Amount::MAX);

    let Ok(receipt) = router.add_liquidity(
        &mut exchange,
        owner(),
        &add_request(token_a(), token_b(), Amount::new(500), Amount::new(500)),
    ) else {
        panic!("add_liquidity failed");
    };
    assert!(!receipt.shares.is_zero());
    let Some(id) = exchange.get_pair(token_a(), token_b()) else {
        panic!("pair not created");
    };
    assert_eq!(
        exchange.get_reserves(id),
        Ok((Amount::new(500), Amount::new(500)))
    );

    // Quote matches the calculator.
    let route = direct(token_a(), token_b());
    let Ok(quoted) = router.get_amounts_out(&exchange, Amount::new(10), &route) else {
        panic!("quote failed");
    };
    let Ok(expected) = QuoteCalculator::amount_out(
        Amount::new(10),
        Amount::new(500),
        Amount::new(500),
        FeeTier::default(),
    ) else {
        panic!("calculator failed");
    };
    assert_eq!(quoted, vec![Amount::new(10), expected]);

    // The swap pays strictly between zero and the input.
    let Ok(amounts) = router.swap_exact_tokens_for_tokens(
        &mut exchange,
        trader(),
        &sell(Amount::new(10), Amount::ZERO, route.clone()),
    ) else {
        panic!("swap failed");
    };
    let out = amounts[1];
    assert!(out > Amount::ZERO && out < Amount::new(10));
    assert_eq!(out, expected);

    // Demanding twice the output is rejected and changes nothing.
    let before = exchange.clone();
    let Some(twice) = out.checked_mul(&Amount::new(2)) else {
        panic!("overflow");
    };
    let Err(err) = router.swap_exact_tokens_for_tokens(
        &mut exchange,
        trader(),
        &sell(Amount::new(10), twice, route),
    ) else {
        panic!("slippage guard missed");
    };
    assert_eq!(err.code(), "INSUFFICIENT_OUTPUT_AMOUNT");
    assert_eq!(exchange, before);
}

// ---------------------------------------------------------------------------
// Full lifecycle with 18-decimal amounts
// ---------------------------------------------------------------------------

#[test]
fn liquidity_lifecycle_in_ether_units() {
    let router = router();
    let mut exchange = funded_exchange(&router, ether(10_000));

    let Ok(minted) = router.add_liquidity(
        &mut exchange,
        owner(),
        &add_request(token_a(), token_b(), ether(100), ether(100)),
    ) else {
        panic!("add_liquidity failed");
    };
    assert_eq!(minted.shares, Shares::new(ether(100).get()));
    assert_eq!(
        exchange.allowance(token_a(), owner(), router.address()),
        ether(9_900)
    );

    // Trader sells 10 A for B.
    let route = direct(token_a(), token_b());
    let Ok(quoted) = router.get_amounts_out(&exchange, ether(10), &route) else {
        panic!("quote failed");
    };
    let Ok(executed) = router.swap_exact_tokens_for_tokens(
        &mut exchange,
        trader(),
        &sell(ether(10), quoted[1], route),
    ) else {
        panic!("swap failed");
    };
    assert_eq!(executed, quoted);
    assert_eq!(
        exchange.balance_of(token_b(), trader()),
        ether(1_000_000).checked_add(&quoted[1]).unwrap_or(Amount::MAX)
    );

    // Owner approves the router for its shares and withdraws everything.
    let Some(id) = exchange.get_pair(token_a(), token_b()) else {
        panic!("pair missing");
    };
    let Ok(()) = exchange.approve_shares(id, owner(), router.address(), minted.shares) else {
        panic!("share approval failed");
    };
    let Ok(burned) = router.remove_liquidity(
        &mut exchange,
        owner(),
        &RemoveLiquidity {
            asset_a: token_a(),
            asset_b: token_b(),
            shares: minted.shares,
            amount_a_min: ether(100),
            amount_b_min: Amount::ZERO,
            recipient: owner(),
            deadline: deadline(),
        },
    ) else {
        panic!("remove failed");
    };
    assert_eq!(burned.amount_a, ether(110));
    assert!(burned.amount_b < ether(100));
    assert_eq!(exchange.get_reserves(id), Ok((Amount::ZERO, Amount::ZERO)));

    for token in [token_a(), token_b()] {
        assert!(exchange.check_conservation(token).is_ok());
    }
    let kinds: Vec<&str> = exchange
        .events()
        .iter()
        .filter_map(|e| match e {
            DexEvent::PairCreated { .. } => Some("created"),
            DexEvent::Mint { .. } => Some("mint"),
            DexEvent::Swap { .. } => Some("swap"),
            DexEvent::Burn { .. } => Some("burn"),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec!["created", "mint", "swap", "burn"]);
}

#[test]
fn second_provider_never_withdraws_more_than_supplied() {
    let router = router();
    let mut exchange = funded_exchange(&router, Amount::MAX);
    let Ok(_) = router.add_liquidity(
        &mut exchange,
        owner(),
        &add_request(token_a(), token_b(), ether(1_000), ether(1_000)),
    ) else {
        panic!("seed failed");
    };
    let Ok(_) = router.swap_exact_tokens_for_tokens(
        &mut exchange,
        owner(),
        &sell(ether(10), Amount::ZERO, direct(token_a(), token_b())),
    ) else {
        panic!("swap failed");
    };

    let mut request = add_request(token_a(), token_b(), ether(10), ether(10));
    request.recipient = trader();
    let Ok(minted) = router.add_liquidity(&mut exchange, trader(), &request) else {
        panic!("second deposit failed");
    };
    assert!(minted.amount_a <= ether(10) && minted.amount_b <= ether(10));

    let Some(id) = exchange.get_pair(token_a(), token_b()) else {
        panic!("pair missing");
    };
    let Ok(()) = exchange.approve_shares(id, trader(), router.address(), minted.shares) else {
        panic!("share approval failed");
    };
    let Ok(burned) = router.remove_liquidity(
        &mut exchange,
        trader(),
        &RemoveLiquidity {
            asset_a: token_a(),
            asset_b: token_b(),
            shares: minted.shares,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            recipient: trader(),
            deadline: deadline(),
        },
    ) else {
        panic!("remove failed");
    };
    assert!(burned.amount_a <= minted.amount_a);
    assert!(burned.amount_b <= minted.amount_b);
}

// ---------------------------------------------------------------------------
// Multi-hop
// ---------------------------------------------------------------------------

#[test]
fn exact_in_and_exact_out_through_two_pools() {
    let router = router();
    let mut exchange = funded_exchange(&router, Amount::MAX);
    for (x, y) in [(token_a(), token_b()), (token_b(), token_c())] {
        let Ok(_) = router.add_liquidity(
            &mut exchange,
            owner(),
            &add_request(x, y, ether(1_000), ether(1_000)),
        ) else {
            panic!("seed failed");
        };
    }
    let Ok(route) = Route::new(vec![token_a(), token_b(), token_c()]) else {
        panic!("valid route");
    };

    let Ok(out_quote) = router.get_amounts_out(&exchange, ether(5), &route) else {
        panic!("quote failed");
    };
    assert_eq!(out_quote.len(), 3);
    assert!(out_quote[2] < out_quote[1] && out_quote[1] < out_quote[0]);

    let Ok(in_quote) = router.get_amounts_in(&exchange, ether(5), &route) else {
        panic!("quote failed");
    };
    assert!(in_quote[0] > ether(5));

    let Ok(bought) = router.swap_tokens_for_exact_tokens(
        &mut exchange,
        trader(),
        &SwapExactOut {
            amount_out: ether(5),
            amount_in_max: in_quote[0],
            route: route.clone(),
            recipient: trader(),
            deadline: deadline(),
        },
    ) else {
        panic!("exact-out swap failed");
    };
    assert_eq!(bought[0], in_quote[0]);
    assert!(bought[2] >= ether(5));

    let Ok(sold) = router.swap_exact_tokens_for_tokens(
        &mut exchange,
        trader(),
        &sell(ether(5), Amount::ZERO, route),
    ) else {
        panic!("exact-in swap failed");
    };
    assert_eq!(sold[0], ether(5));
    for token in [token_a(), token_b(), token_c()] {
        assert!(exchange.check_conservation(token).is_ok());
    }
}

#[test]
fn missing_hop_is_pair_not_found() {
    let router = router();
    let mut exchange = funded_exchange(&router, Amount::MAX);
    let Ok(_) = router.add_liquidity(
        &mut exchange,
        owner(),
        &add_request(token_a(), token_b(), ether(10), ether(10)),
    ) else {
        panic!("seed failed");
    };
    let Ok(route) = Route::new(vec![token_a(), token_b(), token_c()]) else {
        panic!("valid route");
    };
    let before = exchange.clone();
    assert_eq!(
        router.swap_exact_tokens_for_tokens(
            &mut exchange,
            trader(),
            &sell(ether(1), Amount::ZERO, route)
        ),
        Err(DexError::PairNotFound)
    );
    assert_eq!(exchange, before);
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

#[test]
fn expired_operations_fail_and_mutate_nothing() {
    let router = router();
    let mut exchange = funded_exchange(&router, Amount::MAX);
    let Ok(minted) = router.add_liquidity(
        &mut exchange,
        owner(),
        &add_request(token_a(), token_b(), ether(50), ether(50)),
    ) else {
        panic!("seed failed");
    };
    let Some(id) = exchange.get_pair(token_a(), token_b()) else {
        panic!("pair missing");
    };
    let Ok(()) = exchange.approve_shares(id, owner(), router.address(), minted.shares) else {
        panic!("share approval failed");
    };

    router.clock().set(deadline().saturating_add(1));
    let before = exchange.clone();

    let results = [
        router
            .add_liquidity(
                &mut exchange,
                owner(),
                &add_request(token_a(), token_c(), ether(1), ether(1)),
            )
            .map(|_| ()),
        router
            .remove_liquidity(
                &mut exchange,
                owner(),
                &RemoveLiquidity {
                    asset_a: token_a(),
                    asset_b: token_b(),
                    shares: minted.shares,
                    amount_a_min: Amount::ZERO,
                    amount_b_min: Amount::ZERO,
                    recipient: owner(),
                    deadline: deadline(),
                },
            )
            .map(|_| ()),
        router
            .swap_exact_tokens_for_tokens(
                &mut exchange,
                trader(),
                &sell(ether(1), Amount::ZERO, direct(token_a(), token_b())),
            )
            .map(|_| ()),
        router
            .swap_tokens_for_exact_tokens(
                &mut exchange,
                trader(),
                &SwapExactOut {
                    amount_out: ether(1),
                    amount_in_max: Amount::MAX,
                    route: direct(token_b(), token_a()),
                    recipient: trader(),
                    deadline: deadline(),
                },
            )
            .map(|_| ()),
    ];
    for result in results {
        let Err(err) = result else {
            panic!("expired operation accepted");
        };
        assert_eq!(err.code(), "EXPIRED");
        assert_eq!(err.kind(), ErrorKind::Expiry);
    }
    assert_eq!(exchange, before);
}

// ---------------------------------------------------------------------------
// Shared access
// ---------------------------------------------------------------------------

#[test]
fn concurrent_swaps_are_serialized() {
    let router = router();
    let exchange = funded_exchange(&router, Amount::MAX);
    let shared = SharedExchange::new(exchange);
    let Ok(_) = shared.write(|ex| {
        router.add_liquidity(
            ex,
            owner(),
            &add_request(token_a(), token_b(), ether(1_000), ether(1_000)),
        )
    }) else {
        panic!("seed failed");
    };
    let Ok(Some(id)) = shared.read(|ex| ex.get_pair(token_a(), token_b())) else {
        panic!("pair missing");
    };
    let Ok(k_before) = shared.read(|ex| ex.pool(id).map(|p| p.k_last())) else {
        panic!("read failed");
    };

    thread::scope(|scope| {
        for i in 0..4u32 {
            let shared = shared.clone();
            let router = &router;
            scope.spawn(move || {
                let route = if i % 2 == 0 {
                    direct(token_a(), token_b())
                } else {
                    direct(token_b(), token_a())
                };
                for _ in 0..10 {
                    let Ok(_) = shared.write(|ex| {
                        router.swap_exact_tokens_for_tokens(
                            ex,
                            trader(),
                            &sell(ether(1), Amount::ZERO, route.clone()),
                        )
                    }) else {
                        panic!("swap failed");
                    };
                }
            });
        }
    });

    let Ok(snapshot) = shared.snapshot() else {
        panic!("snapshot failed");
    };
    let Ok(pool) = snapshot.pool(id) else {
        panic!("pool missing");
    };
    let Ok(k_before) = k_before else {
        panic!("pool missing before swaps");
    };
    assert!(pool.k_last() >= k_before);
    let swaps = snapshot
        .events()
        .iter()
        .filter(|e| matches!(e, DexEvent::Swap { .. }))
        .count();
    assert_eq!(swaps, 40);
    for token in [token_a(), token_b()] {
        assert!(snapshot.check_conservation(token).is_ok());
    }
}
