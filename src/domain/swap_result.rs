//! Outcome of a single-pool swap.

use core::fmt;

use super::Amount;
use crate::error::{DexError, Result};

/// The outcome of a swap: amounts exchanged and the fee retained.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee <= amount_in`.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, SwapResult};
///
/// let result = SwapResult::new(Amount::new(1000), Amount::new(990), Amount::new(3));
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapResult {
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidInput`] if `amount_in` is zero or `fee > amount_in`.
    /// - [`DexError::InsufficientOutputAmount`] if `amount_out` is zero.
    pub const fn new(amount_in: Amount, amount_out: Amount, fee: Amount) -> Result<Self> {
        if amount_in.is_zero() {
            return Err(DexError::InvalidInput("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(DexError::InsufficientOutputAmount);
        }
        if fee.get() > amount_in.get() {
            return Err(DexError::InvalidInput("fee exceeds amount_in"));
        }
        Ok(Self {
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee retained by the pool.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Realized price `amount_out / amount_in`, for display only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn effective_price(&self) -> f64 {
        self.amount_out.get() as f64 / self.amount_in.get() as f64
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult(in={}, out={}, fee={})",
            self.amount_in, self.amount_out, self.fee
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_result() {
        let Ok(r) = SwapResult::new(Amount::new(1000), Amount::new(990), Amount::new(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(r.amount_in(), Amount::new(1000));
        assert_eq!(r.amount_out(), Amount::new(990));
        assert_eq!(r.fee(), Amount::new(3));
    }

    #[test]
    fn zero_input_rejected() {
        assert!(matches!(
            SwapResult::new(Amount::ZERO, Amount::new(1), Amount::ZERO),
            Err(DexError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_output_rejected() {
        assert_eq!(
            SwapResult::new(Amount::new(1), Amount::ZERO, Amount::ZERO),
            Err(DexError::InsufficientOutputAmount)
        );
    }

    #[test]
    fn fee_may_equal_dust_input() {
        assert!(SwapResult::new(Amount::new(1), Amount::new(1), Amount::new(1)).is_ok());
        assert!(SwapResult::new(Amount::new(1), Amount::new(1), Amount::new(2)).is_err());
    }

    #[test]
    fn effective_price() {
        let Ok(r) = SwapResult::new(Amount::new(100), Amount::new(200), Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert!((r.effective_price() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display() {
        let Ok(r) = SwapResult::new(Amount::new(10), Amount::new(9), Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(r.to_string(), "SwapResult(in=10, out=9, fee=1)");
    }
}
