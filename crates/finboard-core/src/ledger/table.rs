use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::ledger::types::Transaction;

pub const DEFAULT_PAGE_SIZE: usize = 15;
/// Upper bound on page numbers offered around the current page.
pub const PAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Account,
    Industry,
    State,
    Type,
    Amount,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Account => "account",
            Self::Industry => "industry",
            Self::State => "state",
            Self::Type => "type",
            Self::Amount => "amount",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date" => Some(Self::Date),
            "account" => Some(Self::Account),
            "industry" => Some(Self::Industry),
            "state" => Some(Self::State),
            "type" => Some(Self::Type),
            "amount" => Some(Self::Amount),
            _ => None,
        }
    }

    fn compare(self, left: &Transaction, right: &Transaction) -> Ordering {
        match self {
            Self::Date => left.date.cmp(&right.date),
            Self::Account => left.account.cmp(&right.account),
            Self::Industry => left.industry.cmp(&right.industry),
            Self::State => left.state.cmp(&right.state),
            Self::Type => left.kind.as_str().cmp(right.kind.as_str()),
            Self::Amount => left.amount.total_cmp(&right.amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    /// Selecting the active key flips direction; a new key starts ascending.
    pub fn toggle(current: Option<Self>, key: SortKey) -> Self {
        match current {
            Some(active) if active.key == key => Self {
                key,
                direction: active.direction.flipped(),
            },
            _ => Self::ascending(key),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableQuery<'a> {
    pub search: &'a str,
    pub sort: Option<SortState>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery<'_> {
    fn default() -> Self {
        Self {
            search: "",
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub rows: Vec<Transaction>,
    /// Requested page after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Rows matching the search, across all pages.
    pub total_rows: usize,
    pub page_numbers: Vec<usize>,
}

/// Searches, sorts and slices `transactions` into one page.
///
/// Never fails: out-of-range pages are clamped and a zero page size is
/// treated as one row per page.
pub fn project(transactions: &[Transaction], query: &TableQuery<'_>) -> TablePage {
    let mut matching = search(transactions, query.search);
    if let Some(sort) = query.sort {
        // Stable sort: ties keep their input order in both directions.
        matching.sort_by(|left, right| {
            let ordering = sort.key.compare(left, right);
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let page_size = query.page_size.max(1);
    let total_rows = matching.len();
    let total_pages = total_rows.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let rows = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect::<Vec<Transaction>>();

    TablePage {
        rows,
        page,
        total_pages,
        total_rows,
        page_numbers: page_window(page, total_pages),
    }
}

/// Page numbers to offer around `page`, at most [`PAGE_WINDOW`] of them.
pub fn page_window(page: usize, total_pages: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let page = page.clamp(1, total_pages);
    let half = PAGE_WINDOW / 2;
    let latest_start = total_pages.saturating_sub(PAGE_WINDOW - 1).max(1);
    let start = page.saturating_sub(half).clamp(1, latest_start);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    (start..=end).collect()
}

fn search<'a>(transactions: &'a [Transaction], query: &str) -> Vec<&'a Transaction> {
    if query.trim().is_empty() {
        return transactions.iter().collect();
    }

    let needle = query.to_lowercase();
    transactions
        .iter()
        .filter(|transaction| {
            [
                &transaction.account,
                &transaction.industry,
                &transaction.state,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Caller-owned table state: search text, sort and current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub search: String,
    pub sort: Option<SortState>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableView {
    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.page = 1;
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(SortState::toggle(self.sort, key));
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Filters changed upstream, so the old page number no longer means anything.
    pub fn filters_changed(&mut self) {
        self.page = 1;
    }

    pub fn query(&self) -> TableQuery<'_> {
        TableQuery {
            search: &self.search,
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Projects and remembers the clamped page.
    pub fn render(&mut self, transactions: &[Transaction]) -> TablePage {
        let projected = project(transactions, &self.query());
        self.page = projected.page;
        projected
    }
}
