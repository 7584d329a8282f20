//! Request types for the payroll API.
//!
//! Create bodies have their own request structs so that defaults (such as the
//! commission rate for a new plumber) are applied before the model is built.
//! Partial updates deserialize straight into the model update types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{NewJob, NewPayroll, NewPlumber, PayrollStatus, validation};

/// Commission rate, in percent, given to a plumber created without one.
pub const DEFAULT_COMMISSION_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

fn default_commission_rate() -> Decimal {
    DEFAULT_COMMISSION_RATE
}

fn default_true() -> bool {
    true
}

/// Body of `POST /api/plumbers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlumberRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Commission percentage; 30 when omitted.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,
    /// Whether the plumber is currently working; true when omitted.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Employment start date.
    pub start_date: NaiveDate,
}

impl From<CreatePlumberRequest> for NewPlumber {
    fn from(req: CreatePlumberRequest) -> Self {
        NewPlumber {
            name: req.name,
            email: req.email,
            phone: req.phone,
            commission_rate: req.commission_rate,
            is_active: req.is_active,
            start_date: req.start_date,
        }
    }
}

/// Body of `POST /api/jobs`.
///
/// There is no commission field; it is always computed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobRequest {
    /// Date the work was done.
    pub date: NaiveDate,
    /// Customer name.
    pub customer_name: String,
    /// Amount billed.
    pub revenue: Decimal,
    /// Parts cost before markup.
    #[serde(default)]
    pub parts_cost: Decimal,
    /// Outside labor cost before markup.
    #[serde(default)]
    pub outside_labor: Decimal,
    /// The plumber who did the work.
    pub plumber_id: u64,
    /// The payroll period to settle the job in.
    pub payroll_id: u64,
}

impl From<CreateJobRequest> for NewJob {
    fn from(req: CreateJobRequest) -> Self {
        NewJob {
            date: req.date,
            customer_name: req.customer_name,
            revenue: req.revenue,
            parts_cost: req.parts_cost,
            outside_labor: req.outside_labor,
            plumber_id: req.plumber_id,
            payroll_id: req.payroll_id,
        }
    }
}

/// Body of `POST /api/payrolls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayrollRequest {
    /// Last day of the pay week.
    pub week_ending_date: NaiveDate,
    /// Initial status; draft when omitted.
    #[serde(default)]
    pub status: PayrollStatus,
}

impl From<CreatePayrollRequest> for NewPayroll {
    fn from(req: CreatePayrollRequest) -> Self {
        NewPayroll {
            week_ending_date: req.week_ending_date,
            status: req.status,
        }
    }
}

/// Body of `POST /api/calculate-commission`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRequest {
    /// Amount billed.
    pub revenue: Decimal,
    /// Parts cost before markup.
    pub parts_cost: Decimal,
    /// Outside labor cost before markup.
    pub outside_labor: Decimal,
    /// Commission percentage.
    pub commission_rate: Decimal,
}

impl CommissionRequest {
    /// Rejects negative amounts and rates outside 0 to 100.
    pub fn validate(&self) -> EngineResult<()> {
        validation::currency_amount("revenue", self.revenue)?;
        validation::currency_amount("parts_cost", self.parts_cost)?;
        validation::currency_amount("outside_labor", self.outside_labor)?;
        validation::percentage("commission_rate", self.commission_rate)
    }
}
