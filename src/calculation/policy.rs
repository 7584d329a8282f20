//! The shared commission policy.
//!
//! The cost markup and the floor-at-zero rule are used by the commission
//! calculator when a job is priced and by the payroll aggregator when adjusted
//! costs are re-derived for a report. Both take the same [`CommissionPolicy`]
//! so the two can never disagree.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Returns the cost markup multiplier.
///
/// Parts and outside labor are marked up 25% before being subtracted from
/// revenue, so the multiplier is 1.25.
pub fn cost_markup_multiplier() -> Decimal {
    Decimal::new(125, 2)
}

/// Number of decimal places used when rounding currency for display.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Markup and rounding rules shared by the calculator and the aggregator.
///
/// # Example
///
/// ```
/// use plumber_payroll::calculation::CommissionPolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let policy = CommissionPolicy::default();
/// assert_eq!(
///     policy.mark_up(Decimal::from_str("250.00").unwrap()).unwrap(),
///     Decimal::from_str("312.50").unwrap()
/// );
/// assert!(policy.mark_up(Decimal::MAX).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionPolicy {
    markup_multiplier: Decimal,
}

impl Default for CommissionPolicy {
    fn default() -> Self {
        Self {
            markup_multiplier: cost_markup_multiplier(),
        }
    }
}

impl CommissionPolicy {
    /// Returns the multiplier applied to raw costs.
    pub fn markup_multiplier(&self) -> Decimal {
        self.markup_multiplier
    }

    /// Applies the markup to a raw cost.
    ///
    /// Fails with [`EngineError::AmountOutOfRange`] when the marked-up cost
    /// does not fit in a `Decimal`.
    pub fn mark_up(&self, cost: Decimal) -> EngineResult<Decimal> {
        in_range("marked_up_cost", cost.checked_mul(self.markup_multiplier))
    }

    /// Clamps a commission base so a loss-making job never yields a negative
    /// commission.
    pub fn floor_at_zero(&self, value: Decimal) -> Decimal {
        value.max(Decimal::ZERO)
    }

    /// Rounds a currency amount to cents, halves away from zero.
    pub fn round_currency(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(
            CURRENCY_DECIMAL_PLACES,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}

/// Turns the result of a checked `Decimal` operation into an [`EngineResult`].
pub(crate) fn in_range(field: &str, value: Option<Decimal>) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::out_of_range(field))
}
