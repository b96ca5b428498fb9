use serde::Serialize;

use crate::ledger::date::{epoch_ms_to_date, format_iso_date};
use crate::ledger::types::{
    KIND_DEPOSIT, KIND_WITHDRAW, RawTransactionRecord, Transaction, TransactionType,
};
use crate::{ClientError, ClientResult};

/// A source record that could not be normalized, by batch position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Accepted transactions in ascending date order.
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RejectedRecord>,
}

/// Converts one provider record into a canonical [`Transaction`].
///
/// `index` must be unique within the batch; it becomes the `txn-<index>` id.
pub fn normalize(raw: &RawTransactionRecord, index: usize) -> ClientResult<Transaction> {
    let Some(date) = epoch_ms_to_date(raw.date) else {
        return Err(ClientError::invalid_record(
            index,
            &format!("epoch value {} is not a representable calendar day", raw.date),
        ));
    };

    Ok(Transaction {
        id: format!("txn-{index}"),
        date: format_iso_date(&date),
        amount: parse_amount(&raw.amount, index),
        kind: map_kind(&raw.kind, index),
        currency: raw.currency.clone(),
        account: raw.account.clone(),
        industry: raw.industry.clone(),
        state: raw.state.clone(),
    })
}

/// Normalizes a whole provider batch.
///
/// Records with unusable dates are skipped and reported; the survivors are
/// stably sorted by date so downstream views can rely on chronological input.
pub fn normalize_batch(records: &[RawTransactionRecord]) -> NormalizedBatch {
    normalize_indexed(records.iter().enumerate())
}

/// Like [`normalize_batch`] with caller-chosen indices, for sources that
/// already dropped rows and must keep ids aligned with source positions.
pub fn normalize_indexed<'a, I>(records: I) -> NormalizedBatch
where
    I: IntoIterator<Item = (usize, &'a RawTransactionRecord)>,
{
    let mut batch = NormalizedBatch::default();
    for (index, raw) in records {
        match normalize(raw, index) {
            Ok(transaction) => batch.transactions.push(transaction),
            Err(error) => {
                tracing::warn!(index, "skipping transaction record: {}", error.message);
                batch.rejected.push(RejectedRecord {
                    index,
                    reason: error.message,
                });
            }
        }
    }

    batch
        .transactions
        .sort_by(|left, right| left.date.cmp(&right.date));
    tracing::debug!(
        accepted = batch.transactions.len(),
        rejected = batch.rejected.len(),
        "normalized transaction batch"
    );
    batch
}

/// Parses a cent count and returns major units.
///
/// Mirrors lenient integer parsing: leading whitespace, an optional sign and
/// the longest run of digits. Anything without digits becomes zero.
fn parse_amount(value: &str, index: usize) -> f64 {
    let Some(cents) = parse_cents_prefix(value) else {
        tracing::warn!(index, amount = value, "malformed amount treated as zero");
        return 0.0;
    };
    if cents < 0.0 {
        tracing::warn!(index, amount = value, "negative amount stored as its magnitude");
    }
    cents.abs() / 100.0
}

/// Signed cent count of the leading integer. Digit runs wider than `i64`
/// keep their magnitude as a float.
fn parse_cents_prefix(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = unsigned
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if digit_count == 0 {
        return None;
    }

    let digits = &unsigned[..digit_count];
    let magnitude = match digits.parse::<i64>() {
        Ok(integer) => integer as f64,
        Err(_) => digits.parse::<f64>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn map_kind(label: &str, index: usize) -> TransactionType {
    if label == KIND_DEPOSIT {
        return TransactionType::Income;
    }
    if label != KIND_WITHDRAW {
        tracing::warn!(index, kind = label, "unknown transaction kind treated as expense");
    }
    TransactionType::Expense
}
