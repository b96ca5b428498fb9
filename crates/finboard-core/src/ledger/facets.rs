use std::collections::BTreeSet;

use serde::Serialize;

use crate::ledger::types::Transaction;

/// Selectable filter values and the date span of a loaded set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataFacets {
    pub accounts: Vec<String>,
    pub industries: Vec<String>,
    pub states: Vec<String>,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

pub fn extract_facets(transactions: &[Transaction]) -> DataFacets {
    let mut accounts = BTreeSet::new();
    let mut industries = BTreeSet::new();
    let mut states = BTreeSet::new();
    for transaction in transactions {
        accounts.insert(transaction.account.as_str());
        industries.insert(transaction.industry.as_str());
        states.insert(transaction.state.as_str());
    }

    DataFacets {
        accounts: owned(accounts),
        industries: owned(industries),
        states: owned(states),
        min_date: transactions.iter().map(|row| &row.date).min().cloned(),
        max_date: transactions.iter().map(|row| &row.date).max().cloned(),
    }
}

fn owned(values: BTreeSet<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}
