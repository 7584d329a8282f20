//! Commission calculation.
//!
//! Converts one job's raw financials and a plumber's commission rate into a
//! [`CommissionBreakdown`]. The function is pure: it validates nothing and
//! accepts negative or out-of-range inputs, producing a proportional result.
//! Range checks belong to the request validation layer. The only failure is
//! an intermediate that no longer fits in a `Decimal`.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::CommissionBreakdown;

use super::CommissionPolicy;
use super::policy::in_range;

/// Calculates the commission for a single job.
///
/// # Arguments
///
/// * `revenue` - Amount billed to the customer
/// * `parts_cost` - Raw parts cost, before markup
/// * `outside_labor` - Raw subcontracted labor cost, before markup
/// * `commission_rate_percent` - The plumber's rate, conventionally 0-100
/// * `policy` - The shared markup policy
///
/// # Algorithm
///
/// 1. Mark up parts cost and outside labor by the policy multiplier
/// 2. Sum them into adjusted costs
/// 3. Commission base is revenue minus adjusted costs, floored at zero
/// 4. Commission is the base times `commission_rate_percent / 100`
///
/// # Errors
///
/// Returns [`EngineError::AmountOutOfRange`](crate::error::EngineError::AmountOutOfRange)
/// when any intermediate overflows the `Decimal` range.
///
/// # Examples
///
/// ```
/// use plumber_payroll::calculation::{calculate_commission, CommissionPolicy};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let breakdown = calculate_commission(
///     dec("850.00"),
///     dec("250.00"),
///     dec("100.00"),
///     dec("30"),
///     &CommissionPolicy::default(),
/// )
/// .unwrap();
/// assert_eq!(breakdown.adjusted_costs, dec("437.50"));
/// assert_eq!(breakdown.commission_amount, dec("123.75"));
/// ```
pub fn calculate_commission(
    revenue: Decimal,
    parts_cost: Decimal,
    outside_labor: Decimal,
    commission_rate_percent: Decimal,
    policy: &CommissionPolicy,
) -> EngineResult<CommissionBreakdown> {
    let parts_cost_with_markup = policy.mark_up(parts_cost)?;
    let outside_labor_with_markup = policy.mark_up(outside_labor)?;
    let adjusted_costs = in_range(
        "adjusted_costs",
        parts_cost_with_markup.checked_add(outside_labor_with_markup),
    )?;

    let commission_base = policy.floor_at_zero(in_range(
        "commission_base",
        revenue.checked_sub(adjusted_costs),
    )?);
    let commission_amount = in_range(
        "commission_amount",
        commission_base.checked_mul(commission_rate_percent / Decimal::ONE_HUNDRED),
    )?;

    Ok(CommissionBreakdown {
        revenue,
        parts_cost_with_markup,
        outside_labor_with_markup,
        adjusted_costs,
        commission_base,
        commission_amount,
    })
}
