//! Commission breakdown produced by the commission calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every intermediate value of one commission calculation.
///
/// The report layer displays the full breakdown, not just the final amount,
/// so each step of the calculation is kept.
///
/// # Example
///
/// ```
/// use plumber_payroll::models::CommissionBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = CommissionBreakdown {
///     revenue: Decimal::from_str("850.00").unwrap(),
///     parts_cost_with_markup: Decimal::from_str("312.50").unwrap(),
///     outside_labor_with_markup: Decimal::from_str("125.00").unwrap(),
///     adjusted_costs: Decimal::from_str("437.50").unwrap(),
///     commission_base: Decimal::from_str("412.50").unwrap(),
///     commission_amount: Decimal::from_str("123.75").unwrap(),
/// };
/// assert!(breakdown.commission_amount <= breakdown.commission_base);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    /// Revenue as supplied.
    pub revenue: Decimal,
    /// Parts cost multiplied by the markup.
    pub parts_cost_with_markup: Decimal,
    /// Outside labor multiplied by the markup.
    pub outside_labor_with_markup: Decimal,
    /// Sum of the two marked-up costs.
    pub adjusted_costs: Decimal,
    /// Revenue minus adjusted costs, floored at zero.
    pub commission_base: Decimal,
    /// Commission base times the rate percentage.
    pub commission_amount: Decimal,
}

impl CommissionBreakdown {
    /// Applies `round` to every field. Used for display; stored amounts are
    /// kept at full precision.
    pub fn map(self, round: impl Fn(Decimal) -> Decimal) -> Self {
        Self {
            revenue: round(self.revenue),
            parts_cost_with_markup: round(self.parts_cost_with_markup),
            outside_labor_with_markup: round(self.outside_labor_with_markup),
            adjusted_costs: round(self.adjusted_costs),
            commission_base: round(self.commission_base),
            commission_amount: round(self.commission_amount),
        }
    }
}
