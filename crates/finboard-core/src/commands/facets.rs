use crate::ClientResult;
use crate::commands::common::{SourceOptions, load_dashboard, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::FacetsData;
use crate::ledger::extract_facets;

pub fn run(path: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions {
        path,
        ..SourceOptions::default()
    })
}

/// Facets cover the whole loaded set, ignoring stored filters.
#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let view = load_dashboard(options)?;
    let data = FacetsData {
        facets: extract_facets(&view.source.transactions),
        source: source_summary(&view.source),
    };
    success("facets", data)
}
