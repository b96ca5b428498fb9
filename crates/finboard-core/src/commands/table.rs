use crate::commands::common::{SourceOptions, load_dashboard, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::TableData;
use crate::ledger::{DEFAULT_PAGE_SIZE, SortDirection, SortKey, SortState, TableQuery, project};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct TableRunOptions<'a> {
    pub source: SourceOptions<'a>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub descending: bool,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableRunOptions<'_> {
    fn default() -> Self {
        Self {
            source: SourceOptions::default(),
            search: None,
            sort: None,
            descending: false,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

pub fn run(
    path: Option<&str>,
    search: Option<String>,
    sort: Option<SortKey>,
    descending: bool,
    page: usize,
    page_size: usize,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(TableRunOptions {
        source: SourceOptions {
            path,
            ..SourceOptions::default()
        },
        search,
        sort,
        descending,
        page,
        page_size,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: TableRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let sort = resolve_sort(options.sort, options.descending)?;
    if options.page_size == 0 {
        return Err(ClientError::invalid_argument_for_command(
            "`--page-size` must be at least 1.",
            Some("table"),
        ));
    }

    let view = load_dashboard(options.source)?;
    let search = options.search.unwrap_or_default();
    let page = project(
        &view.filtered,
        &TableQuery {
            search: &search,
            sort,
            page: options.page,
            page_size: options.page_size,
        },
    );

    let data = TableData {
        search,
        sort,
        page_size: options.page_size,
        table: page,
        filters_active: view.filters.is_active(),
        filters: view.filters,
        source: source_summary(&view.source),
    };
    success("table", data)
}

fn resolve_sort(key: Option<SortKey>, descending: bool) -> ClientResult<Option<SortState>> {
    match key {
        Some(key) => Ok(Some(SortState {
            key,
            direction: if descending {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            },
        })),
        None if descending => Err(ClientError::invalid_argument_for_command(
            "`--desc` requires `--sort <key>`.",
            Some("table"),
        )),
        None => Ok(None),
    }
}
