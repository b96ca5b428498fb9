use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::ledger::RawTransactionRecord;
use crate::source::invalid_input_error;
use crate::{ClientError, ClientResult};

pub(crate) const SOURCE_FIELDS: [&str; 7] = [
    "date",
    "amount",
    "transaction_type",
    "currency",
    "account",
    "industry",
    "state",
];

/// One source row before normalization. `index` is the zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedRow {
    pub(crate) index: usize,
    pub(crate) date: Option<i64>,
    pub(crate) amount: String,
    pub(crate) kind: String,
    pub(crate) currency: String,
    pub(crate) account: String,
    pub(crate) industry: String,
    pub(crate) state: String,
}

impl ParsedRow {
    /// The provider record, or `None` when the row carries no usable epoch.
    pub(crate) fn to_record(&self) -> Option<RawTransactionRecord> {
        Some(RawTransactionRecord {
            date: self.date?,
            amount: self.amount.clone(),
            kind: self.kind.clone(),
            currency: self.currency.clone(),
            account: self.account.clone(),
            industry: self.industry.clone(),
            state: self.state.clone(),
        })
    }
}

pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Transaction source is empty."));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if trimmed.starts_with('{') || serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_source_format(
            "JSON input must be a top-level array of transaction objects.",
            "json_non_array",
        ));
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    Err(ClientError::invalid_source_format(
        "Unsupported source format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of transaction objects.",
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects with transaction fields.",
            ));
        };

        rows.push(ParsedRow {
            index,
            date: object.get("date").and_then(epoch_from_json),
            amount: read_text(object, "amount"),
            kind: read_text(object, "transaction_type"),
            currency: read_text(object, "currency"),
            account: read_text(object, "account"),
            industry: read_text(object, "industry"),
            state: read_text(object, "state"),
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::source_schema_mismatch(
            SOURCE_FIELDS.iter().map(|value| value.to_string()).collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        rows.push(ParsedRow {
            index,
            date: epoch_from_text(&value_for(&record, &index_by_name, "date")),
            amount: value_for(&record, &index_by_name, "amount"),
            kind: value_for(&record, &index_by_name, "transaction_type"),
            currency: value_for(&record, &index_by_name, "currency"),
            account: value_for(&record, &index_by_name, "account"),
            industry: value_for(&record, &index_by_name, "industry"),
            state: value_for(&record, &index_by_name, "state"),
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> String {
    index_by_name
        .get(field_name)
        .and_then(|index| record.get(*index))
        .unwrap_or_default()
        .to_string()
}

fn read_text(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(value)) => value.clone(),
        Some(other) => other.to_string(),
    }
}

fn epoch_from_json(value: &Value) -> Option<i64> {
    if let Some(integer) = value.as_i64() {
        return Some(integer);
    }
    value.as_f64().and_then(truncate_epoch)
}

fn epoch_from_text(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Some(integer);
    }
    trimmed.parse::<f64>().ok().and_then(truncate_epoch)
}

/// Fractional milliseconds are dropped; values beyond `i64` saturate and are
/// rejected later by normalization.
fn truncate_epoch(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    if actual_headers.len() != SOURCE_FIELDS.len() {
        return false;
    }
    SOURCE_FIELDS
        .iter()
        .all(|field| actual_headers.iter().any(|header| header == field))
}
