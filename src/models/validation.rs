//! Field checks shared by the input models.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Largest money amount a single job may carry: one trillion.
///
/// Keeps a job's marked-up costs and any payroll's running totals far inside
/// the `Decimal` range.
pub fn max_currency_amount() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// Accepts money amounts from zero up to [`max_currency_amount`].
pub fn currency_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::validation(field, "must not be negative"));
    }
    if value > max_currency_amount() {
        return Err(EngineError::validation(
            field,
            format!("must not exceed {}", max_currency_amount()),
        ));
    }
    Ok(())
}

/// Accepts a commission rate between 0 and 100 inclusive.
pub fn percentage(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(EngineError::validation(
            field,
            format!("must be between 0 and 100, got {value}"),
        ));
    }
    Ok(())
}

/// Rejects empty or whitespace-only text.
pub fn non_empty(field: &str, value: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Loose shape check: `local@domain.tld` with no whitespace.
pub fn email(field: &str, value: &str) -> EngineResult<()> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(EngineError::validation(field, "must be a valid email address"));
    }
    Ok(())
}

/// Rejects the zero id, which is never assigned.
pub fn reference(field: &str, id: u64) -> EngineResult<()> {
    if id == 0 {
        return Err(EngineError::validation(field, "must reference an existing record"));
    }
    Ok(())
}
