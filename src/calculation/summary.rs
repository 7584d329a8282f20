//! Payroll summary aggregation.
//!
//! Folds the jobs of one payroll period into one row per plumber. Adjusted
//! costs are re-derived with the shared [`CommissionPolicy`], while commission
//! totals are the sum of each job's stored amount and are never re-derived.

use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{JobWithPlumber, PayrollSummary};

use super::CommissionPolicy;
use super::policy::in_range;

/// Builds the per-plumber summary rows for a payroll period.
///
/// Rows are returned in ascending plumber id order. Only plumbers with at
/// least one job get a row.
///
/// # Errors
///
/// Returns [`EngineError::InvalidReference`] if a row's attached plumber is
/// not the one its job references. The join is expected to be resolved
/// before this runs, so a mismatch aborts the whole aggregation.
///
/// Returns [`EngineError::AmountOutOfRange`] if a running total leaves the
/// `Decimal` range.
///
/// # Examples
///
/// ```
/// use plumber_payroll::calculation::{summarize, CommissionPolicy};
///
/// let rows = summarize(&[], &CommissionPolicy::default()).unwrap();
/// assert!(rows.is_empty());
/// ```
pub fn summarize(
    jobs: &[JobWithPlumber],
    policy: &CommissionPolicy,
) -> EngineResult<Vec<PayrollSummary>> {
    let mut rows: BTreeMap<u64, PayrollSummary> = BTreeMap::new();

    for JobWithPlumber { job, plumber } in jobs {
        if plumber.id != job.plumber_id {
            return Err(EngineError::InvalidReference {
                job_id: job.id,
                plumber_id: job.plumber_id,
            });
        }

        let row = rows
            .entry(plumber.id)
            .or_insert_with(|| PayrollSummary::empty(plumber.id, plumber.name.as_str()));

        let raw_costs = in_range("job_costs", job.parts_cost.checked_add(job.outside_labor))?;
        let adjusted_costs = policy.mark_up(raw_costs)?;

        row.job_count += 1;
        row.total_revenue = in_range("total_revenue", row.total_revenue.checked_add(job.revenue))?;
        row.total_costs = in_range("total_costs", row.total_costs.checked_add(adjusted_costs))?;
        row.total_commission = in_range(
            "total_commission",
            row.total_commission.checked_add(job.commission_amount),
        )?;
    }

    Ok(rows.into_values().collect())
}
