//! The router: liquidity provision and routed swaps.

use tracing::{debug, info, warn};

use super::{AddLiquidity, RemoveLiquidity, SwapExactIn, SwapExactOut};
use crate::clock::SystemClock;
use crate::config::RouterConfig;
use crate::domain::{
    AccountId, Amount, AssetPair, BurnReceipt, DexEvent, MintReceipt, Route, Timestamp,
};
use crate::error::{DexError, Result};
use crate::exchange::Exchange;
use crate::ledger::{AssetLedger, PreparedTransfers, TransferBatch};
use crate::quote::{HopReserves, QuoteCalculator};
use crate::registry::{PoolStage, StagedPools};
use crate::traits::{Clock, FromConfig, LiquidityPool, SwapPool};

/// Executes liquidity and swap operations against an [`Exchange`].
///
/// The router holds no exchange state: the exchange is passed into every
/// call.  Its [`address`](Self::address) is the spender owners approve for
/// their assets (and, before [`remove_liquidity`](Self::remove_liquidity),
/// for their pool shares).  A caller equal to the router address needs no
/// allowance.
///
/// # Examples
///
/// ```
/// use hydra_dex::clock::ManualClock;
/// use hydra_dex::config::RouterConfig;
/// use hydra_dex::domain::{AccountId, Amount, AssetId, Route, Timestamp};
/// use hydra_dex::exchange::Exchange;
/// use hydra_dex::router::{AddLiquidity, Router, SwapExactIn};
///
/// let (a, b) = (AssetId::from_bytes([1u8; 20]), AssetId::from_bytes([2u8; 20]));
/// let alice = AccountId::from_bytes([0xa1; 20]);
///
/// let router = Router::new(RouterConfig::default(), ManualClock::new(Timestamp::from_secs(100)));
/// let mut exchange = Exchange::default();
/// for asset in [a, b] {
///     exchange.mint_asset(asset, alice, Amount::new(10_000)).expect("minted");
///     exchange.approve(asset, alice, router.address(), Amount::MAX);
/// }
///
/// let deadline = Timestamp::from_secs(200);
/// router
///     .add_liquidity(&mut exchange, alice, &AddLiquidity {
///         asset_a: a,
///         asset_b: b,
///         amount_a_desired: Amount::new(500),
///         amount_b_desired: Amount::new(500),
///         amount_a_min: Amount::ZERO,
///         amount_b_min: Amount::ZERO,
///         recipient: alice,
///         deadline,
///     })
///     .expect("deposited");
///
/// let route = Route::direct(a, b).expect("valid route");
/// let amounts = router
///     .swap_exact_tokens_for_tokens(&mut exchange, alice, &SwapExactIn {
///         amount_in: Amount::new(10),
///         amount_out_min: Amount::ZERO,
///         route,
///         recipient: alice,
///         deadline,
///     })
///     .expect("swapped");
/// assert_eq!(amounts, vec![Amount::new(10), Amount::new(9)]);
/// ```
#[derive(Debug, Clone)]
pub struct Router<C = SystemClock> {
    config: RouterConfig,
    clock: C,
}

impl FromConfig<RouterConfig> for Router<SystemClock> {
    fn from_config(config: &RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(*config, SystemClock))
    }
}

impl<C> Router<C> {
    /// Creates a router reading time from `clock`.
    #[must_use]
    pub const fn new(config: RouterConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// The spender identity owners approve.
    #[must_use]
    pub const fn address(&self) -> AccountId {
        self.config.address()
    }

    /// The router's time source.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> Router<C> {
    // -- quotes ---------------------------------------------------------------

    /// Amounts along `route` when selling `amount_in` of its first asset.
    ///
    /// The result has one entry per route asset and starts with
    /// `amount_in`.  Read-only.
    ///
    /// # Errors
    ///
    /// - [`DexError::PairNotFound`] if a hop has no pool.
    /// - [`DexError::InsufficientLiquidity`] if a hop's pool is empty.
    /// - [`DexError::InvalidInput`] if `amount_in` is zero.
    pub fn get_amounts_out(
        &self,
        exchange: &Exchange,
        amount_in: Amount,
        route: &Route,
    ) -> Result<Vec<Amount>> {
        let stage = exchange.registry().stage();
        quote_out(&stage, amount_in, route)
    }

    /// Amounts along `route` when buying `amount_out` of its last asset.
    ///
    /// The result has one entry per route asset and ends with
    /// `amount_out`; entry `0` is the input required.  Read-only.
    ///
    /// # Errors
    ///
    /// - [`DexError::PairNotFound`] if a hop has no pool.
    /// - [`DexError::InsufficientLiquidity`] if a hop's pool is empty or
    ///   cannot deliver the requested output.
    pub fn get_amounts_in(
        &self,
        exchange: &Exchange,
        amount_out: Amount,
        route: &Route,
    ) -> Result<Vec<Amount>> {
        let stage = exchange.registry().stage();
        quote_in(&stage, amount_out, route)
    }

    // -- liquidity ------------------------------------------------------------

    /// Deposits liquidity, creating the pair at the default fee if absent.
    ///
    /// Against a non-empty pool the deposit is matched to the current
    /// reserve ratio: the full desired amount of one side is used and the
    /// other side is reduced to match.  The returned receipt is in the
    /// caller's asset order.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past the deadline.
    /// - [`DexError::IdenticalAssets`] if both assets are equal.
    /// - [`DexError::InsufficientAmount`] if a matched or consumed amount is
    ///   below its minimum.
    /// - [`DexError::InsufficientInitialLiquidity`] /
    ///   [`DexError::InsufficientLiquidityMinted`] from the pool.
    /// - [`DexError::InsufficientAllowance`] / [`DexError::InsufficientBalance`]
    ///   if the caller cannot pay.
    pub fn add_liquidity(
        &self,
        exchange: &mut Exchange,
        caller: AccountId,
        request: &AddLiquidity,
    ) -> Result<MintReceipt> {
        self.ensure_live(request.deadline)?;
        let registry = exchange.registry();
        let mut stage = registry.stage();
        let mut events = Vec::new();

        let pool_id = match stage.get_pair(request.asset_a, request.asset_b) {
            Some(id) => id,
            None => {
                let fee = registry.config().default_fee_tier();
                let id = stage.create_pair(request.asset_a, request.asset_b, fee)?;
                events.push(DexEvent::PairCreated {
                    pool: id,
                    pair: AssetPair::new(request.asset_a, request.asset_b)?,
                    all_pairs_length: id.index() + 1,
                });
                id
            }
        };

        let pool = stage.pool_mut(pool_id)?;
        let (reserve_a, reserve_b) = pool.reserves_for(request.asset_a)?;
        let (amount_a, amount_b) = matched_amounts(request, reserve_a, reserve_b)?;

        let in_order = pool.pair().is_first(&request.asset_a);
        let receipt = if in_order {
            pool.mint(amount_a, amount_b, request.recipient)?
        } else {
            pool.mint(amount_b, amount_a, request.recipient)?.flipped()
        };
        if receipt.amount_a < request.amount_a_min {
            warn!(consumed = %receipt.amount_a, min = %request.amount_a_min, "deposit below minimum");
            return Err(DexError::InsufficientAmount("amount_a below minimum"));
        }
        if receipt.amount_b < request.amount_b_min {
            warn!(consumed = %receipt.amount_b, min = %request.amount_b_min, "deposit below minimum");
            return Err(DexError::InsufficientAmount("amount_b below minimum"));
        }

        let mut batch = TransferBatch::new(self.address());
        batch
            .pull(request.asset_a, caller, receipt.amount_a)
            .pull(request.asset_b, caller, receipt.amount_b);
        let transfers = exchange.ledger().prepare(&batch)?;

        let canonical = if in_order { receipt } else { receipt.flipped() };
        events.push(DexEvent::Mint {
            pool: pool_id,
            sender: caller,
            recipient: request.recipient,
            amount_a: canonical.amount_a,
            amount_b: canonical.amount_b,
            shares: canonical.shares,
        });

        let pools = stage.into_changes();
        exchange.settle(pools, transfers, events)?;
        info!(
            pool = %pool_id,
            amount_a = %receipt.amount_a,
            amount_b = %receipt.amount_b,
            shares = %receipt.shares,
            "liquidity added"
        );
        Ok(receipt)
    }

    /// Burns the caller's shares and sends the released assets to the
    /// recipient.  The receipt is in the caller's asset order.
    ///
    /// Unless the caller is the router, the caller must first approve the
    /// router for at least `shares` pool shares; the allowance is spent.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past the deadline.
    /// - [`DexError::PairNotFound`] if the pair is not registered.
    /// - [`DexError::InsufficientAllowance`] if the share allowance is short.
    /// - [`DexError::InsufficientShares`] if the caller holds too few shares.
    /// - [`DexError::InsufficientOutputAmount`] if a released amount is
    ///   below its minimum.
    pub fn remove_liquidity(
        &self,
        exchange: &mut Exchange,
        caller: AccountId,
        request: &RemoveLiquidity,
    ) -> Result<BurnReceipt> {
        self.ensure_live(request.deadline)?;
        let mut stage = exchange.registry().stage();
        let pool_id = stage.resolve(request.asset_a, request.asset_b)?;
        let pool = stage.pool_mut(pool_id)?;

        let router = self.address();
        if caller != router {
            pool.spend_share_allowance(caller, router, request.shares)
                .map_err(|e| {
                    warn!(%caller, shares = %request.shares, "share allowance too small");
                    e
                })?;
        }
        let canonical = pool.burn(request.shares, caller)?;
        let receipt = if pool.pair().is_first(&request.asset_a) {
            canonical
        } else {
            canonical.flipped()
        };
        if receipt.amount_a < request.amount_a_min || receipt.amount_b < request.amount_b_min {
            warn!(
                amount_a = %receipt.amount_a,
                amount_b = %receipt.amount_b,
                "withdrawal below minimum"
            );
            return Err(DexError::InsufficientOutputAmount);
        }

        let mut batch = TransferBatch::new(router);
        batch
            .push(request.asset_a, request.recipient, receipt.amount_a)
            .push(request.asset_b, request.recipient, receipt.amount_b);
        let transfers = exchange.ledger().prepare(&batch)?;

        let events = vec![DexEvent::Burn {
            pool: pool_id,
            owner: caller,
            recipient: request.recipient,
            amount_a: canonical.amount_a,
            amount_b: canonical.amount_b,
            shares: request.shares,
        }];
        let pools = stage.into_changes();
        exchange.settle(pools, transfers, events)?;
        info!(
            pool = %pool_id,
            amount_a = %receipt.amount_a,
            amount_b = %receipt.amount_b,
            shares = %request.shares,
            "liquidity removed"
        );
        Ok(receipt)
    }

    // -- swaps ----------------------------------------------------------------

    /// Sells exactly `amount_in` along the route.
    ///
    /// Returns the executed amount at every route position.  Each hop
    /// re-prices against reserves already updated by earlier hops and must
    /// deliver at least its quoted amount.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past the deadline.
    /// - Any quote error of [`get_amounts_out`](Self::get_amounts_out).
    /// - [`DexError::InsufficientOutputAmount`] if the final amount is below
    ///   `amount_out_min`.
    /// - [`DexError::InsufficientAllowance`] / [`DexError::InsufficientBalance`]
    ///   if the caller cannot pay.
    pub fn swap_exact_tokens_for_tokens(
        &self,
        exchange: &mut Exchange,
        caller: AccountId,
        request: &SwapExactIn,
    ) -> Result<Vec<Amount>> {
        self.ensure_live(request.deadline)?;
        let mut stage = exchange.registry().stage();
        let quoted = quote_out(&stage, request.amount_in, &request.route)?;
        let expected = last(&quoted)?;
        if expected < request.amount_out_min {
            warn!(%expected, min = %request.amount_out_min, "swap output below minimum");
            return Err(DexError::InsufficientOutputAmount);
        }
        let execution = self.execute(
            &mut stage,
            exchange.ledger(),
            caller,
            &request.route,
            &quoted,
            request.recipient,
        )?;
        let pools = stage.into_changes();
        Self::settle_swap(exchange, pools, execution)
    }

    /// Buys `amount_out` along the route for at most `amount_in_max`.
    ///
    /// Returns the executed amount at every route position; the final entry
    /// is at least `amount_out`.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past the deadline.
    /// - Any quote error of [`get_amounts_in`](Self::get_amounts_in).
    /// - [`DexError::ExcessiveInputAmount`] if the required input exceeds
    ///   `amount_in_max`.
    /// - [`DexError::InsufficientAllowance`] / [`DexError::InsufficientBalance`]
    ///   if the caller cannot pay.
    pub fn swap_tokens_for_exact_tokens(
        &self,
        exchange: &mut Exchange,
        caller: AccountId,
        request: &SwapExactOut,
    ) -> Result<Vec<Amount>> {
        self.ensure_live(request.deadline)?;
        let mut stage = exchange.registry().stage();
        let quoted = quote_in(&stage, request.amount_out, &request.route)?;
        let required = first(&quoted)?;
        if required > request.amount_in_max {
            warn!(%required, max = %request.amount_in_max, "swap input above maximum");
            return Err(DexError::ExcessiveInputAmount);
        }
        let execution = self.execute(
            &mut stage,
            exchange.ledger(),
            caller,
            &request.route,
            &quoted,
            request.recipient,
        )?;
        let pools = stage.into_changes();
        Self::settle_swap(exchange, pools, execution)
    }

    // -- internals ------------------------------------------------------------

    fn ensure_live(&self, deadline: Timestamp) -> Result<()> {
        let now = self.clock.now();
        if now.is_after(deadline) {
            warn!(%deadline, %now, "operation expired");
            return Err(DexError::Expired {
                deadline: deadline.as_secs(),
                now: now.as_secs(),
            });
        }
        Ok(())
    }

    /// Runs every hop on `stage` and validates the caller's input and the
    /// recipient's output against `ledger`.
    fn execute(
        &self,
        stage: &mut PoolStage<'_>,
        ledger: &AssetLedger,
        caller: AccountId,
        route: &Route,
        quoted: &[Amount],
        recipient: AccountId,
    ) -> Result<Execution> {
        let amount_in = first(quoted)?;
        let mut amounts = Vec::with_capacity(quoted.len());
        let mut events = Vec::with_capacity(route.hop_count());
        amounts.push(amount_in);

        let mut current = amount_in;
        for ((from, to), &min_out) in route.hops().zip(quoted.iter().skip(1)) {
            let pool_id = stage.resolve(from, to)?;
            let result = stage.pool_mut(pool_id)?.swap(current, from, min_out)?;
            events.push(DexEvent::Swap {
                pool: pool_id,
                asset_in: from,
                asset_out: to,
                amount_in: current,
                amount_out: result.amount_out(),
                sender: caller,
            });
            current = result.amount_out();
            amounts.push(current);
        }

        let mut batch = TransferBatch::new(self.address());
        batch
            .pull(route.input(), caller, amount_in)
            .push(route.output(), recipient, current);
        let transfers = ledger.prepare(&batch)?;
        Ok(Execution {
            amounts,
            transfers,
            events,
        })
    }

    fn settle_swap(
        exchange: &mut Exchange,
        pools: StagedPools,
        execution: Execution,
    ) -> Result<Vec<Amount>> {
        let Execution {
            amounts,
            transfers,
            events,
        } = execution;
        exchange.settle(pools, transfers, events)?;
        info!(
            amount_in = ?amounts.first(),
            amount_out = ?amounts.last(),
            hops = amounts.len().saturating_sub(1),
            "swap executed"
        );
        Ok(amounts)
    }
}

/// A fully validated swap awaiting commit.
struct Execution {
    amounts: Vec<Amount>,
    transfers: PreparedTransfers,
    events: Vec<DexEvent>,
}

/// Amounts matching the pool's ratio, as in Uniswap's `_addLiquidity`.
fn matched_amounts(
    request: &AddLiquidity,
    reserve_a: Amount,
    reserve_b: Amount,
) -> Result<(Amount, Amount)> {
    if reserve_a.is_zero() && reserve_b.is_zero() {
        return Ok((request.amount_a_desired, request.amount_b_desired));
    }
    let b_optimal = QuoteCalculator::quote(request.amount_a_desired, reserve_a, reserve_b)?;
    if b_optimal <= request.amount_b_desired {
        if b_optimal < request.amount_b_min {
            warn!(%b_optimal, min = %request.amount_b_min, "matched amount below minimum");
            return Err(DexError::InsufficientAmount("amount_b below minimum"));
        }
        return Ok((request.amount_a_desired, b_optimal));
    }
    let a_optimal = QuoteCalculator::quote(request.amount_b_desired, reserve_b, reserve_a)?;
    if a_optimal < request.amount_a_min {
        warn!(%a_optimal, min = %request.amount_a_min, "matched amount below minimum");
        return Err(DexError::InsufficientAmount("amount_a below minimum"));
    }
    Ok((a_optimal, request.amount_b_desired))
}

fn hop_reserves(stage: &PoolStage<'_>, route: &Route) -> Result<Vec<HopReserves>> {
    route
        .hops()
        .map(|(from, to)| {
            let pool = stage.pool(stage.resolve(from, to)?)?;
            if pool.is_empty() {
                return Err(DexError::InsufficientLiquidity);
            }
            let (reserve_in, reserve_out) = pool.reserves_for(from)?;
            Ok(HopReserves::new(reserve_in, reserve_out, pool.fee_tier()))
        })
        .collect()
}

fn quote_out(stage: &PoolStage<'_>, amount_in: Amount, route: &Route) -> Result<Vec<Amount>> {
    let amounts = QuoteCalculator::quote_path(amount_in, &hop_reserves(stage, route)?)?;
    debug!(?amounts, "amounts out quoted");
    Ok(amounts)
}

fn quote_in(stage: &PoolStage<'_>, amount_out: Amount, route: &Route) -> Result<Vec<Amount>> {
    let amounts = QuoteCalculator::quote_path_in(amount_out, &hop_reserves(stage, route)?)?;
    debug!(?amounts, "amounts in quoted");
    Ok(amounts)
}

fn first(amounts: &[Amount]) -> Result<Amount> {
    amounts
        .first()
        .copied()
        .ok_or(DexError::InvalidPath("route has no hops"))
}

fn last(amounts: &[Amount]) -> Result<Amount> {
    amounts
        .last()
        .copied()
        .ok_or(DexError::InvalidPath("route has no hops"))
}
