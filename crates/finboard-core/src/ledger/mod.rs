//! Pure transformation pipeline: normalize, filter, then summarize, group by
//! month or project into a table page. Nothing here performs I/O.

pub mod date;
pub mod facets;
pub mod filter;
pub mod metrics;
pub mod monthly;
pub mod normalize;
pub mod table;
pub mod types;

pub use facets::{DataFacets, extract_facets};
pub use filter::apply;
pub use metrics::{Metrics, summarize};
pub use monthly::{MonthlySeries, group_by_month};
pub use normalize::{
    NormalizedBatch, RejectedRecord, normalize, normalize_batch, normalize_indexed,
};
pub use table::{
    DEFAULT_PAGE_SIZE, SortDirection, SortKey, SortState, TablePage, TableQuery, TableView,
    page_window, project,
};
pub use types::{FilterSpec, RawTransactionRecord, Transaction, TransactionType};
