use crate::error::parse_number;
use crate::store::NewRecord;

use super::IngestError;

/// One raw input row, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRow {
    /// 1-based line number in the source, for error messages.
    pub line: u64,
    pub raw_name: Option<String>,
    pub raw_salary: Option<String>,
}

/// What to do with a row that passed structural validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(NewRecord),
    /// Skip this row and keep going.
    Rejected { line: u64, reason: String },
}

impl IngestRow {
    pub fn new(line: u64, name: Option<&str>, salary: Option<&str>) -> Self {
        Self {
            line,
            raw_name: name.map(str::to_string),
            raw_salary: salary.map(str::to_string),
        }
    }

    /// Check fields in order: name present, salary present, salary numeric,
    /// salary non-negative. Only the last check is a soft rejection.
    pub fn validate(self) -> Result<RowOutcome, IngestError> {
        let line = self.line;
        let name = non_empty(self.raw_name).ok_or(IngestError::MissingField {
            line,
            field: "name",
        })?;
        let raw_salary = non_empty(self.raw_salary).ok_or(IngestError::MissingField {
            line,
            field: "salary",
        })?;
        let salary = parse_number("salary", &raw_salary)
            .map_err(|_| IngestError::InvalidSalary {
                line,
                value: raw_salary.clone(),
            })?;

        if salary < 0.0 {
            return Ok(RowOutcome::Rejected {
                line,
                reason: format!("negative salary {raw_salary}"),
            });
        }

        Ok(RowOutcome::Accepted(NewRecord::new(name, salary)))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
