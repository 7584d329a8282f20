//! Report totals.
//!
//! Both folds use checked addition and stop at the first total that leaves
//! the `Decimal` range.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Job, JobTotals, PayrollSummary, SummaryTotals};

use super::CommissionPolicy;
use super::policy::in_range;

fn add(field: &str, total: Decimal, amount: Decimal) -> EngineResult<Decimal> {
    in_range(field, total.checked_add(amount))
}

/// Totals a list of jobs, re-deriving adjusted costs with `policy`.
pub fn job_totals(jobs: &[Job], policy: &CommissionPolicy) -> EngineResult<JobTotals> {
    jobs.iter().try_fold(JobTotals::default(), |acc, job| {
        let adjusted_costs = policy.mark_up(add("job_costs", job.parts_cost, job.outside_labor)?)?;
        Ok(JobTotals {
            total_revenue: add("total_revenue", acc.total_revenue, job.revenue)?,
            total_parts_cost: add("total_parts_cost", acc.total_parts_cost, job.parts_cost)?,
            total_outside_labor: add(
                "total_outside_labor",
                acc.total_outside_labor,
                job.outside_labor,
            )?,
            total_adjusted_costs: add(
                "total_adjusted_costs",
                acc.total_adjusted_costs,
                adjusted_costs,
            )?,
            total_commission: add(
                "total_commission",
                acc.total_commission,
                job.commission_amount,
            )?,
        })
    })
}

/// Sums summary rows into grand totals for a payroll.
pub fn summary_totals(rows: &[PayrollSummary]) -> EngineResult<SummaryTotals> {
    rows.iter().try_fold(SummaryTotals::default(), |acc, row| {
        Ok(SummaryTotals {
            job_count: acc.job_count + row.job_count,
            total_revenue: add("total_revenue", acc.total_revenue, row.total_revenue)?,
            total_costs: add("total_costs", acc.total_costs, row.total_costs)?,
            total_commission: add("total_commission", acc.total_commission, row.total_commission)?,
        })
    })
}
