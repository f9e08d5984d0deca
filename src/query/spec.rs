use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{parse_count, parse_number, ValidationError};

/// Lower salary bound when `min` is not supplied.
pub const DEFAULT_MIN_SALARY: f64 = 0.0;

/// Upper salary bound when `max` is not supplied.
pub const DEFAULT_MAX_SALARY: f64 = 4000.0;

/// Sort order for query results. All orders are ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortKey {
    Name,
    Salary,
    /// Store iteration order.
    #[default]
    None,
}

impl FromStr for SortKey {
    type Err = ValidationError;

    /// Case-insensitive; the empty string means no sorting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "salary" => Ok(SortKey::Salary),
            "none" | "" => Ok(SortKey::None),
            _ => Err(ValidationError::InvalidSort(s.to_string())),
        }
    }
}

/// Raw query parameters as they arrive from a transport.
///
/// Every field is unparsed text; `QuerySpec::from_params` does the
/// validation. `limit` and `pageSize` are the same setting under the two
/// names clients use; `limit` wins when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryParams {
    pub min: Option<String>,
    pub max: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

/// A validated query.
///
/// `min_salary <= max_salary` is not checked: an inverted range is a valid
/// query that matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub min_salary: f64,
    pub max_salary: f64,
    pub offset: usize,
    /// `None` means no limit.
    pub page_size: Option<usize>,
    pub sort: SortKey,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            min_salary: DEFAULT_MIN_SALARY,
            max_salary: DEFAULT_MAX_SALARY,
            offset: 0,
            page_size: None,
            sort: SortKey::None,
        }
    }
}

impl QuerySpec {
    /// Validate raw parameters. Absent or empty values take their defaults;
    /// anything else must parse or the whole query is rejected.
    pub fn from_params(params: &QueryParams) -> Result<Self, ValidationError> {
        let defaults = QuerySpec::default();

        let min_salary = match present(&params.min) {
            Some(raw) => parse_number("min", raw)?,
            None => defaults.min_salary,
        };
        let max_salary = match present(&params.max) {
            Some(raw) => parse_number("max", raw)?,
            None => defaults.max_salary,
        };
        let offset = match present(&params.offset) {
            Some(raw) => parse_count("offset", raw)?,
            None => defaults.offset,
        };
        let page_size = match (present(&params.limit), present(&params.page_size)) {
            (Some(raw), _) => Some(parse_count("limit", raw)?),
            (None, Some(raw)) => Some(parse_count("pageSize", raw)?),
            (None, None) => None,
        };
        let sort = match present(&params.sort) {
            Some(raw) => raw.parse::<SortKey>()?,
            None => SortKey::None,
        };

        Ok(Self {
            min_salary,
            max_salary,
            offset,
            page_size,
            sort,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
