use crate::ClientResult;
use crate::commands::common::{SourceOptions, load_dashboard, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::MetricsData;
use crate::ledger::summarize;

pub fn run(path: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions {
        path,
        ..SourceOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let view = load_dashboard(options)?;
    let data = MetricsData {
        metrics: summarize(&view.filtered),
        filters_active: view.filters.is_active(),
        filters: view.filters,
        source: source_summary(&view.source),
    };
    success("metrics", data)
}
