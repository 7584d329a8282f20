//! Payroll period model.
//!
//! A payroll groups the jobs settled for one week, identified by its
//! week-ending date, and moves from [`PayrollStatus::Draft`] to
//! [`PayrollStatus::Finalized`] once commissions are signed off.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a payroll period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Jobs may still be added, edited or removed.
    #[default]
    Draft,
    /// Signed off; job writes are rejected.
    Finalized,
}

impl PayrollStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollStatus::Draft => "draft",
            PayrollStatus::Finalized => "finalized",
        }
    }
}

/// A weekly payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    /// Store-assigned identifier.
    pub id: u64,
    /// The last day of the payroll week.
    pub week_ending_date: NaiveDate,
    /// Lifecycle state.
    pub status: PayrollStatus,
    /// When the payroll was created.
    pub created_at: DateTime<Utc>,
}

impl Payroll {
    /// Returns true once the payroll has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.status == PayrollStatus::Finalized
    }
}

/// The fields required to create a payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayroll {
    /// The last day of the payroll week.
    pub week_ending_date: NaiveDate,
    /// Initial status, draft unless stated otherwise.
    #[serde(default)]
    pub status: PayrollStatus,
}

impl NewPayroll {
    /// Produces the stored record.
    pub fn into_payroll(self, id: u64, created_at: DateTime<Utc>) -> Payroll {
        Payroll {
            id,
            week_ending_date: self.week_ending_date,
            status: self.status,
            created_at,
        }
    }
}

/// A partial update to a payroll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollUpdate {
    /// New week-ending date.
    #[serde(default)]
    pub week_ending_date: Option<NaiveDate>,
    /// New status.
    #[serde(default)]
    pub status: Option<PayrollStatus>,
}

impl PayrollUpdate {
    /// Applies the present fields onto `payroll`.
    pub fn apply(self, payroll: &mut Payroll) {
        if let Some(date) = self.week_ending_date {
            payroll.week_ending_date = date;
        }
        if let Some(status) = self.status {
            payroll.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PayrollStatus::Draft).unwrap(),
            "\"draft\""
        );
        assert_eq!(
            serde_json::to_string(&PayrollStatus::Finalized).unwrap(),
            "\"finalized\""
        );
    }

    #[test]
    fn test_status_defaults_to_draft() {
        let json = r#"{ "week_ending_date": "2026-10-16" }"#;
        let new_payroll: NewPayroll = serde_json::from_str(json).unwrap();
        assert_eq!(new_payroll.status, PayrollStatus::Draft);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{ "week_ending_date": "2026-10-16", "status": "paid" }"#;
        assert!(serde_json::from_str::<NewPayroll>(json).is_err());
    }

    #[test]
    fn test_into_payroll_and_finalize() {
        let created_at = Utc::now();
        let mut payroll = NewPayroll {
            week_ending_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            status: PayrollStatus::Draft,
        }
        .into_payroll(1, created_at);

        assert!(!payroll.is_finalized());

        PayrollUpdate {
            status: Some(PayrollStatus::Finalized),
            ..Default::default()
        }
        .apply(&mut payroll);

        assert!(payroll.is_finalized());
        assert_eq!(payroll.created_at, created_at);
        assert_eq!(
            payroll.week_ending_date,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(PayrollStatus::Draft.as_str(), "draft");
        assert_eq!(PayrollStatus::Finalized.as_str(), "finalized");
    }
}
