//! Error types for the plumber commission payroll service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the service can report. Errors originate in configuration,
//! storage lookups, payroll lifecycle checks, request validation, the summary
//! join, and arithmetic that leaves the `Decimal` range.

use thiserror::Error;

/// The main error type for the payroll service.
///
/// # Example
///
/// ```
/// use plumber_payroll::error::EngineError;
///
/// let error = EngineError::PlumberNotFound { id: 7 };
/// assert_eq!(error.to_string(), "Plumber not found: 7");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No plumber exists with the given id.
    #[error("Plumber not found: {id}")]
    PlumberNotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// No job exists with the given id.
    #[error("Job not found: {id}")]
    JobNotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// No payroll exists with the given id.
    #[error("Payroll not found: {id}")]
    PayrollNotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// A job references a plumber that cannot be resolved, or the resolved
    /// plumber does not match the job's reference.
    #[error("Job {job_id} references plumber {plumber_id} which could not be resolved")]
    InvalidReference {
        /// The job carrying the dangling reference.
        job_id: u64,
        /// The plumber id the job points at.
        plumber_id: u64,
    },

    /// A job write targeted a payroll that has already been finalized.
    #[error("Payroll {id} is finalized and cannot be modified")]
    PayrollFinalized {
        /// The finalized payroll.
        id: u64,
    },

    /// Request data failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A calculation left the representable `Decimal` range.
    #[error("Amount out of range while computing {field}")]
    AmountOutOfRange {
        /// The figure being computed when the range was exceeded.
        field: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for building a [`EngineError::AmountOutOfRange`].
    pub fn out_of_range(field: impl Into<String>) -> Self {
        Self::AmountOutOfRange {
            field: field.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/server.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/server.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_not_found_variants_display_id() {
        assert_eq!(
            EngineError::JobNotFound { id: 3 }.to_string(),
            "Job not found: 3"
        );
        assert_eq!(
            EngineError::PayrollNotFound { id: 12 }.to_string(),
            "Payroll not found: 12"
        );
    }

    #[test]
    fn test_invalid_reference_displays_job_and_plumber() {
        let error = EngineError::InvalidReference {
            job_id: 4,
            plumber_id: 9,
        };
        assert_eq!(
            error.to_string(),
            "Job 4 references plumber 9 which could not be resolved"
        );
    }

    #[test]
    fn test_payroll_finalized_displays_id() {
        let error = EngineError::PayrollFinalized { id: 2 };
        assert_eq!(
            error.to_string(),
            "Payroll 2 is finalized and cannot be modified"
        );
    }

    #[test]
    fn test_validation_helper_builds_variant() {
        let error = EngineError::validation("revenue", "must be greater than or equal to 0");
        assert_eq!(
            error.to_string(),
            "Invalid field 'revenue': must be greater than or equal to 0"
        );
    }

    #[test]
    fn test_out_of_range_helper_names_the_figure() {
        let error = EngineError::out_of_range("total_revenue");
        assert_eq!(
            error.to_string(),
            "Amount out of range while computing total_revenue"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::PlumberNotFound { id: 1 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
