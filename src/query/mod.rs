//! Query engine - salary-range filtering, sorting and pagination.
//!
//! Raw transport parameters ([`QueryParams`]) are validated into a typed
//! [`QuerySpec`], turned into a [`QueryPlan`] (with any configured page-size
//! cap applied), and executed against a [`crate::store::RecordStore`].
//!
//! Order of operations is fixed: filter, then sort, then page. `total` on
//! the returned [`Page`] counts the filtered set before paging.
//!
//! ```ignore
//! let spec = QuerySpec::from_params(&QueryParams {
//!     max: Some("70000".into()),
//!     sort: Some("SALARY".into()),
//!     ..Default::default()
//! })?;
//! let page = QueryEngine::new(&store).query(&spec)?;
//! ```

mod engine;
mod plan;
mod spec;

pub use engine::QueryEngine;
pub use plan::{Page, QueryPlan};
pub use spec::{QueryParams, QuerySpec, SortKey, DEFAULT_MAX_SALARY, DEFAULT_MIN_SALARY};
