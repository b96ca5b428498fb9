use std::collections::BTreeMap;

use serde::Serialize;

use crate::ledger::date::month_label;
use crate::ledger::types::Transaction;

/// Index-aligned monthly series in ascending month order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlySeries {
    /// `YYYY-MM` bucket keys.
    pub keys: Vec<String>,
    /// Display labels such as `Jan 23`.
    pub months: Vec<String>,
    pub incomes: Vec<f64>,
    pub expenses: Vec<f64>,
    /// Running net total through each month.
    pub balances: Vec<f64>,
}

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct MonthBucket {
    income: f64,
    expense: f64,
}

/// Buckets transactions by calendar month.
///
/// Sums are rounded to cents, half away from zero. The cumulative balance
/// accumulates unrounded bucket nets and rounds only the value it emits, so
/// rounding error does not compound across months.
pub fn group_by_month(transactions: &[Transaction]) -> MonthlySeries {
    let mut buckets: BTreeMap<&str, MonthBucket> = BTreeMap::new();
    for transaction in transactions {
        let bucket = buckets.entry(transaction.month_key()).or_default();
        if transaction.is_income() {
            bucket.income += transaction.amount;
        } else {
            bucket.expense += transaction.amount;
        }
    }

    let mut series = MonthlySeries::default();
    let mut cumulative = 0.0;
    for (key, bucket) in buckets {
        cumulative += bucket.income - bucket.expense;
        series.keys.push(key.to_string());
        series.months.push(month_label(key));
        series.incomes.push(round_cents(bucket.income));
        series.expenses.push(round_cents(bucket.expense));
        series.balances.push(round_cents(cumulative));
    }
    series
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
