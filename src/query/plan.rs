use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use serde::Serialize;

use crate::store::{Record, StoreError};

use super::{QuerySpec, SortKey};

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub records: Vec<Record>,
    /// Number of records matching the filter, before paging.
    pub total: usize,
}

/// An executable filter + sort + page plan.
///
/// Built from a [`QuerySpec`] plus the service's page-size cap. Stores call
/// [`QueryPlan::execute`] over their records in iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub min_salary: f64,
    pub max_salary: f64,
    pub sort: SortKey,
    pub offset: usize,
    /// Effective page size after the cap; `None` means unbounded.
    pub limit: Option<usize>,
}

impl QueryPlan {
    pub fn new(spec: &QuerySpec, max_page_size: Option<usize>) -> Self {
        let limit = match (spec.page_size, max_page_size) {
            (Some(size), Some(cap)) => Some(size.min(cap)),
            (size, None) => size,
            (None, cap) => cap,
        };
        Self {
            min_salary: spec.min_salary,
            max_salary: spec.max_salary,
            sort: spec.sort,
            offset: spec.offset,
            limit,
        }
    }

    /// Inclusive on both ends.
    pub fn matches(&self, record: &Record) -> bool {
        self.min_salary <= record.salary && record.salary <= self.max_salary
    }

    /// Filter, sort and slice `records`.
    ///
    /// Sorting is stable, so records with equal keys keep the order they
    /// were given in. Names are compared with the Unicode root collation,
    /// so case and accents order the way a reader expects ("alice" before
    /// "Carl").
    pub fn execute<'r>(
        &self,
        records: impl IntoIterator<Item = &'r Record>,
    ) -> Result<Page, StoreError> {
        let mut matched: Vec<&Record> = records.into_iter().filter(|r| self.matches(r)).collect();
        let total = matched.len();

        match self.sort {
            SortKey::Name => {
                let collator = name_collator()?;
                matched.sort_by(|a, b| compare_names(&collator, &a.name, &b.name));
            }
            SortKey::Salary => matched.sort_by(|a, b| a.salary.total_cmp(&b.salary)),
            SortKey::None => {}
        }

        let records = matched
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Page { records, total })
    }
}

fn name_collator() -> Result<Collator, StoreError> {
    Collator::try_new(&Default::default(), CollatorOptions::new())
        .map_err(|e| StoreError::Collation(e.to_string()))
}

/// Collation order, with code point order breaking ties between distinct
/// strings the collator considers equal. Identical names compare `Equal`.
fn compare_names(collator: &Collator, a: &str, b: &str) -> Ordering {
    collator.compare(a, b).then_with(|| a.cmp(b))
}
