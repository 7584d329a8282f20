//! Plumber model.
//!
//! A plumber is a commissioned technician. The commission rate stored here is
//! read at job write time and snapshotted into each job's commission amount;
//! changing it later never touches jobs that were already priced.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation;
use crate::error::EngineResult;

/// Represents a plumbing technician paid on commission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plumber {
    /// Store-assigned identifier.
    pub id: u64,
    /// Display name used on payroll reports.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Commission percentage applied to the commission base (0-100).
    pub commission_rate: Decimal,
    /// Whether the plumber is currently taking jobs.
    pub is_active: bool,
    /// The date the plumber started.
    pub start_date: NaiveDate,
}

/// The fields required to create a plumber; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlumber {
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Commission percentage.
    pub commission_rate: Decimal,
    /// Whether the plumber is active.
    pub is_active: bool,
    /// Start date.
    pub start_date: NaiveDate,
}

impl NewPlumber {
    /// Checks the contact fields and that the rate is a percentage.
    pub fn validate(&self) -> EngineResult<()> {
        validation::non_empty("name", &self.name)?;
        validation::email("email", &self.email)?;
        validation::non_empty("phone", &self.phone)?;
        validation::percentage("commission_rate", self.commission_rate)
    }

    /// Attaches an id, producing the stored record.
    pub fn with_id(self, id: u64) -> Plumber {
        Plumber {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            commission_rate: self.commission_rate,
            is_active: self.is_active,
            start_date: self.start_date,
        }
    }
}

/// A partial update to a plumber. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlumberUpdate {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New email.
    #[serde(default)]
    pub email: Option<String>,
    /// New phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// New commission rate. Applies to future job writes only.
    #[serde(default)]
    pub commission_rate: Option<Decimal>,
    /// New active flag.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// New start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl PlumberUpdate {
    /// Checks the fields that are present.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(name) = &self.name {
            validation::non_empty("name", name)?;
        }
        if let Some(email) = &self.email {
            validation::email("email", email)?;
        }
        if let Some(phone) = &self.phone {
            validation::non_empty("phone", phone)?;
        }
        if let Some(rate) = self.commission_rate {
            validation::percentage("commission_rate", rate)?;
        }
        Ok(())
    }

    /// Applies the present fields onto `plumber`.
    pub fn apply(self, plumber: &mut Plumber) {
        if let Some(name) = self.name {
            plumber.name = name;
        }
        if let Some(email) = self.email {
            plumber.email = email;
        }
        if let Some(phone) = self.phone {
            plumber.phone = phone;
        }
        if let Some(rate) = self.commission_rate {
            plumber.commission_rate = rate;
        }
        if let Some(is_active) = self.is_active {
            plumber.is_active = is_active;
        }
        if let Some(start_date) = self.start_date {
            plumber.start_date = start_date;
        }
    }
}
