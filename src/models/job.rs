//! Job model and related types.
//!
//! A job is one piece of completed work. It carries its own financials and a
//! cached `commission_amount` produced by the commission calculator when the
//! job was written. The amount is never recomputed on read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Plumber;
use super::validation;
use crate::error::EngineResult;

/// A completed job belonging to one plumber and one payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Store-assigned identifier.
    pub id: u64,
    /// The date the work was done.
    pub date: NaiveDate,
    /// The customer billed for the job.
    pub customer_name: String,
    /// Amount billed to the customer.
    pub revenue: Decimal,
    /// Raw cost of parts, before markup.
    pub parts_cost: Decimal,
    /// Raw cost of subcontracted labor, before markup.
    pub outside_labor: Decimal,
    /// Commission computed at write time from the fields above and the
    /// plumber's rate at that moment.
    pub commission_amount: Decimal,
    /// The plumber who did the work.
    pub plumber_id: u64,
    /// The payroll period the job is settled in.
    pub payroll_id: u64,
}

impl Job {
    /// Returns true if any field feeding the commission differs from `other`.
    pub fn commission_inputs_differ(&self, other: &Job) -> bool {
        self.revenue != other.revenue
            || self.parts_cost != other.parts_cost
            || self.outside_labor != other.outside_labor
            || self.plumber_id != other.plumber_id
    }
}

/// A job before it has been stored and priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    /// The date the work was done.
    pub date: NaiveDate,
    /// The customer billed.
    pub customer_name: String,
    /// Amount billed.
    pub revenue: Decimal,
    /// Raw parts cost.
    pub parts_cost: Decimal,
    /// Raw outside labor cost.
    pub outside_labor: Decimal,
    /// The plumber who did the work.
    pub plumber_id: u64,
    /// The payroll period.
    pub payroll_id: u64,
}

impl NewJob {
    /// Checks that the money fields are non-negative and the references set.
    pub fn validate(&self) -> EngineResult<()> {
        validation::non_empty("customer_name", &self.customer_name)?;
        validation::currency_amount("revenue", self.revenue)?;
        validation::currency_amount("parts_cost", self.parts_cost)?;
        validation::currency_amount("outside_labor", self.outside_labor)?;
        validation::reference("plumber_id", self.plumber_id)?;
        validation::reference("payroll_id", self.payroll_id)
    }

    /// Produces the stored record with the given id and computed commission.
    pub fn into_job(self, id: u64, commission_amount: Decimal) -> Job {
        Job {
            id,
            date: self.date,
            customer_name: self.customer_name,
            revenue: self.revenue,
            parts_cost: self.parts_cost,
            outside_labor: self.outside_labor,
            commission_amount,
            plumber_id: self.plumber_id,
            payroll_id: self.payroll_id,
        }
    }
}

/// A partial update to a job. The commission is not client-settable; it is
/// recomputed by the write path when a commission input changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobUpdate {
    /// New work date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// New customer name.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// New revenue.
    #[serde(default)]
    pub revenue: Option<Decimal>,
    /// New parts cost.
    #[serde(default)]
    pub parts_cost: Option<Decimal>,
    /// New outside labor cost.
    #[serde(default)]
    pub outside_labor: Option<Decimal>,
    /// Reassign to another plumber.
    #[serde(default)]
    pub plumber_id: Option<u64>,
    /// Move to another payroll period.
    #[serde(default)]
    pub payroll_id: Option<u64>,
}

impl JobUpdate {
    /// Checks the fields that are present.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(customer_name) = &self.customer_name {
            validation::non_empty("customer_name", customer_name)?;
        }
        for (field, value) in [
            ("revenue", self.revenue),
            ("parts_cost", self.parts_cost),
            ("outside_labor", self.outside_labor),
        ] {
            if let Some(value) = value {
                validation::currency_amount(field, value)?;
            }
        }
        if let Some(id) = self.plumber_id {
            validation::reference("plumber_id", id)?;
        }
        if let Some(id) = self.payroll_id {
            validation::reference("payroll_id", id)?;
        }
        Ok(())
    }

    /// Returns a copy of `job` with the present fields applied.
    ///
    /// The commission amount is carried over unchanged; callers decide
    /// whether it needs recomputing.
    pub fn merged_into(&self, job: &Job) -> Job {
        Job {
            id: job.id,
            date: self.date.unwrap_or(job.date),
            customer_name: self
                .customer_name
                .clone()
                .unwrap_or_else(|| job.customer_name.clone()),
            revenue: self.revenue.unwrap_or(job.revenue),
            parts_cost: self.parts_cost.unwrap_or(job.parts_cost),
            outside_labor: self.outside_labor.unwrap_or(job.outside_labor),
            commission_amount: job.commission_amount,
            plumber_id: self.plumber_id.unwrap_or(job.plumber_id),
            payroll_id: self.payroll_id.unwrap_or(job.payroll_id),
        }
    }
}

/// A job joined with its owning plumber, the input of the payroll aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobWithPlumber {
    /// The job row.
    #[serde(flatten)]
    pub job: Job,
    /// The plumber referenced by `job.plumber_id`.
    pub plumber: Plumber,
}
