//! Calculation logic for the payroll service.
//!
//! This module contains the commission calculator, the payroll summary
//! aggregator, the report totals, and the [`CommissionPolicy`] that holds the
//! cost markup and rounding rules both of them share.

mod commission;
mod policy;
mod summary;
mod totals;

pub use commission::calculate_commission;
pub use policy::{CURRENCY_DECIMAL_PLACES, CommissionPolicy, cost_markup_multiplier};
pub use summary::summarize;
pub use totals::{job_totals, summary_totals};
