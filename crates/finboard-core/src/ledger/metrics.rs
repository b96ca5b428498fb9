use std::ops::Add;

use serde::Serialize;

use crate::ledger::types::Transaction;

/// Summary totals over a transaction set. Values are not rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub revenue: f64,
    pub expenses: f64,
    pub total: usize,
    pub balance: f64,
}

impl Add for Metrics {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let revenue = self.revenue + other.revenue;
        let expenses = self.expenses + other.expenses;
        Self {
            revenue,
            expenses,
            total: self.total + other.total,
            balance: revenue - expenses,
        }
    }
}

pub fn summarize(transactions: &[Transaction]) -> Metrics {
    let mut revenue = 0.0;
    let mut expenses = 0.0;
    for transaction in transactions {
        if transaction.is_income() {
            revenue += transaction.amount;
        } else {
            expenses += transaction.amount;
        }
    }

    Metrics {
        revenue,
        expenses,
        total: transactions.len(),
        balance: revenue - expenses,
    }
}
