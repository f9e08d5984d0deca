use thiserror::Error;

/// Malformed or out-of-domain caller input.
///
/// Raised before any store access, so a validation failure never
/// mutates anything.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A numeric parameter did not parse as a finite number.
    #[error("invalid {field}: {value:?} is not a number")]
    InvalidNumber { field: &'static str, value: String },
    /// A count parameter did not parse as a non-negative integer.
    #[error("invalid {field}: {value:?} is not a non-negative integer")]
    InvalidInteger { field: &'static str, value: String },
    /// Unknown sort key.
    #[error("invalid sort: {0:?} (expected NAME, SALARY or NONE)")]
    InvalidSort(String),
    /// A required field is absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// A field is present but has the wrong type.
    #[error("invalid {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    /// Salary below zero.
    #[error("invalid salary: {0} is negative")]
    NegativeSalary(f64),
}

impl ValidationError {
    /// The input field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidNumber { field, .. }
            | ValidationError::InvalidInteger { field, .. }
            | ValidationError::InvalidField { field, .. } => *field,
            ValidationError::MissingField(field) => *field,
            ValidationError::InvalidSort(_) => "sort",
            ValidationError::NegativeSalary(_) => "salary",
        }
    }
}

/// Parse a salary-like value: any finite number.
pub(crate) fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Parse an offset or page size.
pub(crate) fn parse_count(field: &'static str, raw: &str) -> Result<usize, ValidationError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ValidationError::InvalidInteger {
            field,
            value: raw.to_string(),
        })
}
