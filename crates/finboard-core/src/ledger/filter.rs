use std::collections::HashSet;

use crate::ledger::types::{FilterSpec, Transaction};

/// Label sets resolved once per call so membership checks stay O(1).
struct CompiledFilter<'a> {
    start_date: &'a str,
    end_date: &'a str,
    accounts: HashSet<&'a str>,
    industries: HashSet<&'a str>,
    states: HashSet<&'a str>,
}

impl<'a> CompiledFilter<'a> {
    fn new(spec: &'a FilterSpec) -> Self {
        Self {
            start_date: &spec.start_date,
            end_date: &spec.end_date,
            accounts: spec.accounts.iter().map(String::as_str).collect(),
            industries: spec.industries.iter().map(String::as_str).collect(),
            states: spec.states.iter().map(String::as_str).collect(),
        }
    }

    fn matches(&self, transaction: &Transaction) -> bool {
        (self.start_date.is_empty() || transaction.date.as_str() >= self.start_date)
            && (self.end_date.is_empty() || transaction.date.as_str() <= self.end_date)
            && allows(&self.accounts, &transaction.account)
            && allows(&self.industries, &transaction.industry)
            && allows(&self.states, &transaction.state)
    }
}

fn allows(selected: &HashSet<&str>, value: &str) -> bool {
    selected.is_empty() || selected.contains(value)
}

/// Keeps the transactions matching every constraint of `spec`, in input order.
pub fn apply(transactions: &[Transaction], spec: &FilterSpec) -> Vec<Transaction> {
    let compiled = CompiledFilter::new(spec);
    let filtered = transactions
        .iter()
        .filter(|transaction| compiled.matches(transaction))
        .cloned()
        .collect::<Vec<Transaction>>();
    tracing::debug!(
        input = transactions.len(),
        output = filtered.len(),
        "applied dashboard filters"
    );
    filtered
}
