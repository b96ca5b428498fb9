use std::path::{Path, PathBuf};

use crate::contracts::types::SourceSummary;
use crate::ledger::{FilterSpec, Transaction, apply};
use crate::session::AuthSession;
use crate::source::{LoadedSource, load_source};
use crate::state::{ensure_dashboard_directory, resolve_dashboard_home};
use crate::store::{load_filters, load_session};
use crate::{ClientError, ClientResult};

/// Where a data command reads its transactions from.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions<'a> {
    /// File path, or `-` for stdin. `None` falls back to piped stdin.
    pub path: Option<&'a str>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

/// An authenticated dashboard home.
#[derive(Debug, Clone)]
pub(crate) struct DashboardContext {
    pub(crate) home: PathBuf,
    pub(crate) session: AuthSession,
}

/// The loaded source with stored filters applied.
#[derive(Debug, Clone)]
pub(crate) struct DashboardView {
    pub(crate) source: LoadedSource,
    pub(crate) filters: FilterSpec,
    pub(crate) filtered: Vec<Transaction>,
}

pub(crate) fn open_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let home = resolve_dashboard_home(home_override)?;
    ensure_dashboard_directory(&home)?;
    Ok(home)
}

pub(crate) fn require_session(home_override: Option<&Path>) -> ClientResult<DashboardContext> {
    let home = open_home(home_override)?;
    let Some(session) = load_session(&home) else {
        return Err(ClientError::not_authenticated());
    };
    Ok(DashboardContext { home, session })
}

pub(crate) fn load_dashboard(options: SourceOptions<'_>) -> ClientResult<DashboardView> {
    let context = require_session(options.home_override)?;
    tracing::debug!(user = %context.session.user.email, "loading dashboard");

    let source = load_source(options.path, options.stdin_override)?;
    let filters = load_filters(&context.home);
    let filtered = apply(&source.transactions, &filters);
    Ok(DashboardView {
        source,
        filters,
        filtered,
    })
}

pub(crate) fn source_summary(source: &LoadedSource) -> SourceSummary {
    SourceSummary {
        source_kind: source.kind.as_str().to_string(),
        source_ref: source.reference.clone(),
        rows_read: source.rows_read,
        transactions_loaded: source.transactions.len(),
        rejected_count: source.rejected.len(),
        rejected: source.rejected.clone(),
    }
}
