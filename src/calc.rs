//! Simple interest calculation and input validation.
//!
//! Raw form or JSON values come in as optional strings; [`InterestRequest::from_fields`]
//! turns them into validated numbers and [`calculate`] applies the formula.

use serde::Serialize;
use thiserror::Error;

/// Validation failures for user-supplied input.
///
/// Field-level variants carry the field name so the message reads on its own
/// when shown above the form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing value for {field}")]
    Missing { field: String },

    #[error("Invalid numeric input for {field}")]
    NotNumeric { field: String },

    #[error("Invalid integer input for {field}")]
    NotInteger { field: String },

    #[error("{field} must not be negative")]
    Negative { field: String },

    #[error("{field} must be greater than zero")]
    NotPositive { field: String },

    #[error("Invalid {field} format, use YYYY-MM-DD")]
    InvalidDate { field: String },

    #[error("{field} is too late for the payment schedule")]
    DateOutOfRange { field: String },

    #[error("Term must be positive")]
    NonPositiveTerm,

    #[error("Term is too long, at most {max} payments are supported")]
    TermTooLong { max: i64 },
}

impl ValidationError {
    /// Name of the field that failed validation, if the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Missing { field }
            | ValidationError::NotNumeric { field }
            | ValidationError::NotInteger { field }
            | ValidationError::Negative { field }
            | ValidationError::NotPositive { field }
            | ValidationError::InvalidDate { field }
            | ValidationError::DateOutOfRange { field } => Some(field),
            ValidationError::NonPositiveTerm | ValidationError::TermTooLong { .. } => None,
        }
    }
}

/// Validated input for a simple interest calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterestRequest {
    pub principal: f64,
    /// Percent per year.
    pub rate: f64,
    /// Years.
    pub time: f64,
}

/// Outcome of a calculation, amounts rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterestResult {
    pub simple_interest: f64,
    pub total_amount: f64,
}

/// `principal * rate * time / 100`.
pub fn calculate(principal: f64, rate: f64, time: f64) -> f64 {
    principal * rate * time / 100.0
}

/// Round to two decimals, half away from zero.
///
/// Amounts that round to zero come back as `0.0`, never `-0.0`.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Returns the raw value if it holds anything besides whitespace.
pub(crate) fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a single numeric field.
///
/// Absent and blank values are reported as missing. `nan` and `inf` parse as
/// floats in Rust but are rejected here along with anything else non-numeric.
pub fn parse_field(field: &str, raw: Option<&str>) -> Result<f64, ValidationError> {
    let value = non_blank(raw).ok_or_else(|| ValidationError::Missing {
        field: field.to_string(),
    })?;

    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotNumeric {
            field: field.to_string(),
        }),
    }
}

pub(crate) fn require_non_negative(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(value)
}

impl InterestRequest {
    /// Validate the three raw fields.
    ///
    /// Principal and time must be non-negative; a negative rate is accepted and
    /// simply yields negative interest.
    pub fn from_fields(
        principal: Option<&str>,
        rate: Option<&str>,
        time: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let principal = require_non_negative("principal", parse_field("principal", principal)?)?;
        let rate = parse_field("rate", rate)?;
        let time = require_non_negative("time", parse_field("time", time)?)?;
        Ok(Self {
            principal,
            rate,
            time,
        })
    }

    /// Unrounded interest for this request.
    pub fn interest(&self) -> f64 {
        calculate(self.principal, self.rate, self.time)
    }

    pub fn evaluate(&self) -> InterestResult {
        let interest = self.interest();
        InterestResult {
            simple_interest: round_cents(interest),
            total_amount: round_cents(self.principal + interest),
        }
    }
}
