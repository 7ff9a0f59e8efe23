//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Swap reversibility**: round-trip A→B→A returns ≤ original.
//! 2. **Product preservation**: `Ra * Rb` never decreases across swaps.
//! 3. **Fee strictly reduces output** against the fee-free ideal.
//! 4. **Output monotonicity**: a larger input never yields less.
//! 5. **Liquidity conservation**: mint then burn returns ≤ supplied.
//! 6. **Price direction**: selling A makes A cheaper in B.
//! 7. **Exact-in / exact-out consistency**.
//! 8. **Share ledger**: balances sum to total after arbitrary operations.

use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, Shares};
use crate::math::product;
use crate::pools::PairPool;
use crate::quote::QuoteCalculator;
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset_a() -> AssetId {
    AssetId::from_bytes([1u8; 20])
}

fn asset_b() -> AssetId {
    AssetId::from_bytes([2u8; 20])
}

fn lp(n: u8) -> AccountId {
    AccountId::from_bytes([n; 20])
}

fn make_pool(ra: u128, rb: u128) -> PairPool {
    let Ok(pair) = AssetPair::new(asset_a(), asset_b()) else {
        panic!("valid pair");
    };
    let Ok(cfg) = PoolConfig::new(pair, FeeTier::TIER_0_30_PERCENT) else {
        panic!("valid config");
    };
    let Ok(mut pool) = PairPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let Ok(_) = pool.mint(Amount::new(ra), Amount::new(rb), lp(1)) else {
        panic!("initial mint");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves in [10_000, 10_000_000] raw units.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Reserves at 18-decimal scale: 1 to 10^9 whole units.
fn wide_reserve_strategy() -> impl Strategy<Value = u128> {
    (1u128..=1_000_000_000u128).prop_map(|whole| whole * 1_000_000_000_000_000_000)
}

/// Fee tiers from 0 to 1000 bp.
fn fee_strategy() -> impl Strategy<Value = FeeTier> {
    (0u32..=1_000u32).prop_map(|bp| FeeTier::new(crate::domain::BasisPoints::new(bp)))
}

// ---------------------------------------------------------------------------
// Property 1: Swap Reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let swap_in = (ra / 1_000).max(1);
        let mut pool = make_pool(ra, rb);

        let Ok(ab) = pool.swap(Amount::new(swap_in), asset_a(), Amount::ZERO) else {
            return Ok(());
        };
        let Ok(ba) = pool.swap(ab.amount_out(), asset_b(), Amount::ZERO) else {
            return Ok(());
        };

        prop_assert!(
            ba.amount_out().get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            ba.amount_out(), swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Product Preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_non_decreasing(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trades in proptest::collection::vec((any::<bool>(), 1u128..=50_000u128), 1..10),
    ) {
        let mut pool = make_pool(ra, rb);
        for (a_in, amount) in trades {
            let asset = if a_in { asset_a() } else { asset_b() };
            let k_before = pool.k_last();
            if pool.swap(Amount::new(amount), asset, Amount::ZERO).is_ok() {
                prop_assert!(pool.k_last() >= k_before);
            } else {
                prop_assert_eq!(pool.k_last(), k_before);
            }
        }
    }

    #[test]
    fn prop_product_non_decreasing_wide(
        ra in wide_reserve_strategy(),
        rb in wide_reserve_strategy(),
        fraction in 1u128..=1_000u128,
    ) {
        let mut pool = make_pool(ra, rb);
        let k_before = pool.k_last();
        let amount_in = ra / 1_000 * fraction;
        let Ok(_) = pool.swap(Amount::new(amount_in), asset_a(), Amount::ZERO) else {
            return Ok(());
        };
        prop_assert!(pool.k_last() >= k_before);
    }
}

// ---------------------------------------------------------------------------
// Property 3 & 4: Fee effect and monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_output_below_fee_free_ideal(
        ri in wide_reserve_strategy(),
        ro in wide_reserve_strategy(),
        amount_in in 1u128..=1_000_000_000_000_000_000_000u128,
        fee in fee_strategy(),
    ) {
        let Ok(out) = QuoteCalculator::amount_out(
            Amount::new(amount_in), Amount::new(ri), Amount::new(ro), fee,
        ) else {
            return Ok(());
        };
        // out < amount_in * ro / ri  <=>  out * ri < amount_in * ro
        prop_assert!(product(out.get(), ri) < product(amount_in, ro));
    }

    #[test]
    fn prop_output_monotonic_in_input(
        ri in reserve_strategy(),
        ro in reserve_strategy(),
        x in 1u128..=1_000_000u128,
        extra in 0u128..=1_000_000u128,
    ) {
        let fee = FeeTier::TIER_0_30_PERCENT;
        let (Ok(small), Ok(large)) = (
            QuoteCalculator::amount_out(Amount::new(x), Amount::new(ri), Amount::new(ro), fee),
            QuoteCalculator::amount_out(Amount::new(x + extra), Amount::new(ri), Amount::new(ro), fee),
        ) else {
            return Ok(());
        };
        prop_assert!(large >= small);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Liquidity Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_mint_then_burn_returns_at_most_supplied(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in 1u128..=1_000_000u128,
        db in 1u128..=1_000_000u128,
    ) {
        let mut pool = make_pool(ra, rb);
        let Ok(minted) = pool.mint(Amount::new(da), Amount::new(db), lp(2)) else {
            return Ok(());
        };
        prop_assert!(minted.amount_a.get() <= da);
        prop_assert!(minted.amount_b.get() <= db);

        let Ok(burned) = pool.burn(minted.shares, lp(2)) else {
            return Ok(());
        };
        prop_assert!(burned.amount_a <= minted.amount_a);
        prop_assert!(burned.amount_b <= minted.amount_b);
    }

    #[test]
    fn prop_first_provision_round_trip_is_exact(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let mut pool = make_pool(ra, rb);
        let shares = pool.share_balance(&lp(1));
        let Ok(burned) = pool.burn(shares, lp(1)) else {
            panic!("full burn failed");
        };
        prop_assert_eq!(burned.amount_a, Amount::new(ra));
        prop_assert_eq!(burned.amount_b, Amount::new(rb));
        prop_assert!(pool.is_empty());
    }
}

// ---------------------------------------------------------------------------
// Property 6: Price Direction
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_selling_a_lowers_its_price(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let mut pool = make_pool(ra, rb);
        let Ok(before) = pool.spot_price(asset_a()) else {
            return Ok(());
        };
        let Ok(_) = pool.swap(Amount::new((ra / 100).max(1)), asset_a(), Amount::ZERO) else {
            return Ok(());
        };
        let Ok(after) = pool.spot_price(asset_a()) else {
            return Ok(());
        };
        prop_assert!(after < before, "price should fall: before={} after={}", before, after);
    }
}

// ---------------------------------------------------------------------------
// Property 7: Exact-in / exact-out consistency
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_amount_in_buys_at_least_amount_out(
        ri in wide_reserve_strategy(),
        ro in wide_reserve_strategy(),
        per_mille in 1u128..=900u128,
        fee in fee_strategy(),
    ) {
        let want = Amount::new(ro / 1_000 * per_mille);
        let Ok(needed) = QuoteCalculator::amount_in(want, Amount::new(ri), Amount::new(ro), fee) else {
            return Ok(());
        };
        let Ok(got) = QuoteCalculator::amount_out(needed, Amount::new(ri), Amount::new(ro), fee) else {
            return Ok(());
        };
        prop_assert!(got >= want);
    }
}

// ---------------------------------------------------------------------------
// Property 8: Share ledger
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_share_ledger_consistent(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        ops in proptest::collection::vec((0u8..4, 1u8..4, 1u128..=100_000u128), 1..20),
    ) {
        let mut pool = make_pool(ra, rb);
        for (op, who, amount) in ops {
            let account = lp(who);
            match op {
                0 => { let _ = pool.mint(Amount::new(amount), Amount::new(amount), account); }
                1 => { let _ = pool.burn(Shares::new(amount), account); }
                2 => { let _ = pool.swap(Amount::new(amount), asset_a(), Amount::ZERO); }
                _ => { let _ = pool.transfer_shares(account, lp(1), Shares::new(amount)); }
            }
            prop_assert!(pool.check_invariants().is_ok());
        }
    }
}
