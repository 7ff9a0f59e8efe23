//! Unified error types for the exchange engine.
//!
//! All fallible operations across the crate return [`DexError`].  Every
//! variant maps to a stable, literal reason code via [`DexError::code`] so
//! external callers can branch on failures deterministically, and to a
//! coarse [`ErrorKind`] via [`DexError::kind`].
//!
//! Any error aborts the whole operation: no pool, share, or balance
//! mutation from a failed call is ever retained.

use core::fmt;

/// Coarse failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Malformed input: identical assets, zero amounts, bad routes, overflow.
    Validation,
    /// The request conflicts with current state (pair exists, no pool, ...).
    State,
    /// The computed result violates a caller-supplied bound.
    Slippage,
    /// The caller's deadline has elapsed.
    Expiry,
    /// The caller has not authorised the movement of its assets or shares.
    Authorization,
    /// Internal consistency failure.  Never expected with correct arithmetic.
    InvariantFault,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::State => "state",
            Self::Slippage => "slippage",
            Self::Expiry => "expiry",
            Self::Authorization => "authorization",
            Self::InvariantFault => "invariant-fault",
        };
        f.write_str(name)
    }
}

/// Crate-wide error enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DexError {
    /// Both sides of a pair resolve to the same asset.
    #[error("identical assets")]
    IdenticalAssets,

    /// A pool for this unordered pair is already registered.
    #[error("pair already exists")]
    PairExists,

    /// No pool is registered for the requested pair.
    #[error("pair not found")]
    PairNotFound,

    /// A pool identifier does not resolve to a registered pool.
    #[error("unknown pool id {0}")]
    UnknownPool(u32),

    /// An amount or parameter is zero, negative, or otherwise unusable.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// A route is too short or contains a degenerate hop.
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    /// The asset is not one of the pool's two assets.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// A fee value outside the supported range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A configuration invariant does not hold.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Reserves cannot satisfy the requested trade.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The first provision would mint zero shares.
    #[error("insufficient initial liquidity")]
    InsufficientInitialLiquidity,

    /// A deposit too small to mint any shares into an existing pool.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// The owner holds fewer shares than requested.
    #[error("insufficient shares")]
    InsufficientShares,

    /// A matched deposit amount fell below the caller's minimum.
    #[error("insufficient amount: {0}")]
    InsufficientAmount(&'static str),

    /// The output of a trade or withdrawal fell below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// The input required for an exact-output trade exceeds the caller's maximum.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// The operation was submitted after its deadline.
    #[error("expired: deadline {deadline} < now {now}")]
    Expired {
        /// Caller deadline (unix seconds).
        deadline: u64,
        /// Clock reading when the operation was rejected.
        now: u64,
    },

    /// The spender's allowance does not cover the requested movement.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// The owner's balance does not cover the requested movement.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in an internal computation.
    #[error("division by zero")]
    DivisionByZero,

    /// The reserve product would decrease.  Fatal.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// Shared state was poisoned by a panicking writer.
    #[error("exchange state poisoned")]
    StatePoisoned,
}

impl DexError {
    /// Stable literal reason code for external callers.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IdenticalAssets => "IDENTICAL_ASSETS",
            Self::PairExists => "PAIR_EXISTS",
            Self::PairNotFound => "PAIR_NOT_FOUND",
            Self::UnknownPool(_) => "UNKNOWN_POOL",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidPath(_) => "INVALID_PATH",
            Self::InvalidAsset(_) => "INVALID_ASSET",
            Self::InvalidFee(_) => "INVALID_FEE",
            Self::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            Self::InsufficientLiquidity => "INSUFFICIENT_LIQUIDITY",
            Self::InsufficientInitialLiquidity => "INSUFFICIENT_INITIAL_LIQUIDITY",
            Self::InsufficientLiquidityMinted => "INSUFFICIENT_LIQUIDITY_MINTED",
            Self::InsufficientShares => "INSUFFICIENT_SHARES",
            Self::InsufficientAmount(_) => "INSUFFICIENT_AMOUNT",
            Self::InsufficientOutputAmount => "INSUFFICIENT_OUTPUT_AMOUNT",
            Self::ExcessiveInputAmount => "EXCESSIVE_INPUT_AMOUNT",
            Self::Expired { .. } => "EXPIRED",
            Self::InsufficientAllowance => "INSUFFICIENT_ALLOWANCE",
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Self::Overflow(_) => "OVERFLOW",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
            Self::StatePoisoned => "STATE_POISONED",
        }
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IdenticalAssets
            | Self::InvalidInput(_)
            | Self::InvalidPath(_)
            | Self::InvalidAsset(_)
            | Self::InvalidFee(_)
            | Self::InvalidConfiguration(_)
            | Self::Overflow(_) => ErrorKind::Validation,
            Self::PairExists
            | Self::PairNotFound
            | Self::UnknownPool(_)
            | Self::InsufficientLiquidity
            | Self::InsufficientInitialLiquidity
            | Self::InsufficientLiquidityMinted
            | Self::InsufficientShares
            | Self::InsufficientBalance => ErrorKind::State,
            Self::InsufficientAmount(_)
            | Self::InsufficientOutputAmount
            | Self::ExcessiveInputAmount => ErrorKind::Slippage,
            Self::Expired { .. } => ErrorKind::Expiry,
            Self::InsufficientAllowance => ErrorKind::Authorization,
            Self::DivisionByZero | Self::InvariantViolation(_) | Self::StatePoisoned => {
                ErrorKind::InvariantFault
            }
        }
    }

    /// Returns `true` for internal faults that indicate a bug, not a bad request.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvariantFault)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, DexError>;
