use serde::Serialize;

use crate::ledger::{
    DataFacets, FilterSpec, Metrics, MonthlySeries, RejectedRecord, SortState, TablePage,
};
use crate::session::User;

/// Where the transactions came from and how much of the source survived.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub source_kind: String,
    pub source_ref: Option<String>,
    pub rows_read: usize,
    pub transactions_loaded: usize,
    pub rejected_count: usize,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsData {
    pub metrics: Metrics,
    pub filters: FilterSpec,
    pub filters_active: bool,
    pub source: SourceSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyData {
    pub series: MonthlySeries,
    pub filters: FilterSpec,
    pub filters_active: bool,
    pub source: SourceSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub search: String,
    pub sort: Option<SortState>,
    pub page_size: usize,
    pub table: TablePage,
    pub filters: FilterSpec,
    pub filters_active: bool,
    pub source: SourceSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacetsData {
    pub facets: DataFacets,
    pub source: SourceSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct FiltersData {
    pub filters: FilterSpec,
    pub active: bool,
    pub state_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionData {
    pub authenticated: bool,
    pub user: Option<User>,
    pub logged_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutData {
    pub session_cleared: bool,
}
