//! Loads provider transaction records from a JSON array or CSV file (or
//! piped stdin) and normalizes them.

pub(crate) mod input;
pub(crate) mod parse;

pub use input::SourceKind;

use crate::error::SOURCE_HELP_COMMAND;
use crate::ledger::{RejectedRecord, Transaction, normalize_indexed};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub kind: SourceKind,
    pub reference: Option<String>,
    pub rows_read: usize,
    /// Normalized transactions in ascending date order.
    pub transactions: Vec<Transaction>,
    /// Rejected rows ordered by source position.
    pub rejected: Vec<RejectedRecord>,
}

pub fn load_source(path: Option<&str>, stdin_override: Option<String>) -> ClientResult<LoadedSource> {
    let resolved = input::resolve_source(path, stdin_override)?;
    let (rows_read, transactions, rejected) = load_rows(&resolved.content)?;
    tracing::debug!(
        source = resolved.kind.as_str(),
        rows_read,
        accepted = transactions.len(),
        "loaded transaction source"
    );
    Ok(LoadedSource {
        kind: resolved.kind,
        reference: resolved.reference,
        rows_read,
        transactions,
        rejected,
    })
}

/// Parses and normalizes in-memory source content.
pub fn load_from_str(content: &str) -> ClientResult<LoadedSource> {
    let (rows_read, transactions, rejected) = load_rows(content)?;
    Ok(LoadedSource {
        kind: SourceKind::Stdin,
        reference: None,
        rows_read,
        transactions,
        rejected,
    })
}

fn load_rows(content: &str) -> ClientResult<(usize, Vec<Transaction>, Vec<RejectedRecord>)> {
    let rows = parse::parse_source(content)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();
    for row in &rows {
        match row.to_record() {
            Some(record) => records.push((row.index, record)),
            None => {
                tracing::warn!(index = row.index, "skipping transaction row without a numeric date");
                rejected.push(RejectedRecord {
                    index: row.index,
                    reason: format!(
                        "Transaction record {} is invalid: `date` must be a numeric epoch millisecond value",
                        row.index
                    ),
                });
            }
        }
    }

    let batch = normalize_indexed(records.iter().map(|(index, record)| (*index, record)));
    rejected.extend(batch.rejected);
    rejected.sort_by_key(|record| record.index);

    Ok((rows.len(), batch.transactions, rejected))
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide JSON array or CSV input via path or stdin.".to_string(),
            format!("Run `{SOURCE_HELP_COMMAND}` to confirm source field requirements."),
        ],
    )
    .with_source_help()
}
