//! Core data models for the payroll service.
//!
//! Plumbers, jobs and payroll periods are stored entities; commission
//! breakdowns, summary rows and reports are derived and never persisted.

mod commission;
mod job;
mod payroll;
mod plumber;
mod summary;
pub(crate) mod validation;

pub use commission::CommissionBreakdown;
pub use job::{Job, JobUpdate, JobWithPlumber, NewJob};
pub use payroll::{NewPayroll, Payroll, PayrollStatus, PayrollUpdate};
pub use plumber::{NewPlumber, Plumber, PlumberUpdate};
pub use summary::{JobTotals, PayrollReport, PayrollSummary, PlumberReport, SummaryTotals};
