use crate::store::{RecordStore, StoreError};

use super::{Page, QueryPlan, QuerySpec};

/// Runs validated queries against a record store.
///
/// Borrowed per call; holds no state beyond the store reference and the
/// page-size cap, so every query re-reads the store.
pub struct QueryEngine<'a, S> {
    store: &'a S,
    max_page_size: Option<usize>,
}

impl<'a, S: RecordStore> QueryEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            max_page_size: None,
        }
    }

    /// Bound every page, including queries that did not ask for a limit.
    pub fn with_max_page_size(mut self, cap: Option<usize>) -> Self {
        self.max_page_size = cap;
        self
    }

    /// Filter, sort and page. An empty store yields an empty page with
    /// `total == 0`; the only error is a store failure.
    pub fn query(&self, spec: &QuerySpec) -> Result<Page, StoreError> {
        let plan = QueryPlan::new(spec, self.max_page_size);
        let page = self.store.query(&plan)?;
        tracing::debug!(
            min = plan.min_salary,
            max = plan.max_salary,
            sort = ?plan.sort,
            offset = plan.offset,
            limit = ?plan.limit,
            total = page.total,
            returned = page.records.len(),
            "records query"
        );
        Ok(page)
    }
}
