//! Derived payroll summary and report models.
//!
//! None of these are persisted. They are projections of the current job rows,
//! rebuilt on every read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Job, Payroll, Plumber};

/// One plumber's totals within a payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The plumber the row belongs to.
    pub plumber_id: u64,
    /// The plumber's display name at the time of the read.
    pub plumber_name: String,
    /// Number of jobs in the period.
    pub job_count: u32,
    /// Sum of job revenue.
    pub total_revenue: Decimal,
    /// Sum of marked-up parts and outside labor costs.
    pub total_costs: Decimal,
    /// Sum of the jobs' stored commission amounts.
    pub total_commission: Decimal,
}

impl PayrollSummary {
    /// A zeroed row for a plumber seen for the first time.
    pub fn empty(plumber_id: u64, plumber_name: impl Into<String>) -> Self {
        Self {
            plumber_id,
            plumber_name: plumber_name.into(),
            job_count: 0,
            total_revenue: Decimal::ZERO,
            total_costs: Decimal::ZERO,
            total_commission: Decimal::ZERO,
        }
    }
}

/// Grand totals across all summary rows of a payroll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTotals {
    /// Total number of jobs.
    pub job_count: u32,
    /// Total revenue.
    pub total_revenue: Decimal,
    /// Total adjusted costs.
    pub total_costs: Decimal,
    /// Total commission payable.
    pub total_commission: Decimal,
}

/// Totals over a list of jobs, used by the per-plumber report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTotals {
    /// Total revenue.
    pub total_revenue: Decimal,
    /// Total raw parts cost.
    pub total_parts_cost: Decimal,
    /// Total raw outside labor.
    pub total_outside_labor: Decimal,
    /// Total marked-up costs.
    pub total_adjusted_costs: Decimal,
    /// Total stored commission.
    pub total_commission: Decimal,
}

/// A payroll with its per-plumber rows and grand totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// The payroll period.
    pub payroll: Payroll,
    /// One row per plumber with jobs in the period.
    pub rows: Vec<PayrollSummary>,
    /// Totals across all rows.
    pub totals: SummaryTotals,
}

/// One plumber's jobs within one payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlumberReport {
    /// The plumber.
    pub plumber: Plumber,
    /// The payroll period.
    pub payroll: Payroll,
    /// The plumber's jobs in the period, ordered by date then id.
    pub jobs: Vec<Job>,
    /// Totals over `jobs`.
    pub totals: JobTotals,
}
