use serde::{Deserialize, Serialize};

/// Provider label for money coming in.
pub const KIND_DEPOSIT: &str = "deposit";
/// Provider label for money going out.
pub const KIND_WITHDRAW: &str = "withdraw";

/// One row as the transaction provider ships it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransactionRecord {
    /// Epoch milliseconds, UTC.
    pub date: i64,
    /// Cent count encoded as digits, e.g. `"5565"`.
    pub amount: String,
    #[serde(rename = "transaction_type")]
    pub kind: String,
    pub currency: String,
    pub account: String,
    pub industry: String,
    pub state: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Canonical `YYYY-MM-DD`.
    pub date: String,
    /// Major currency units, never negative.
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub currency: String,
    pub account: String,
    pub industry: String,
    pub state: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// `YYYY-MM` bucket key.
    pub fn month_key(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }
}

/// Active dashboard constraints. Empty fields do not restrict anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    pub start_date: String,
    pub end_date: String,
    pub accounts: Vec<String>,
    pub industries: Vec<String>,
    pub states: Vec<String>,
}

impl FilterSpec {
    pub fn set_start_date(&mut self, date: &str) {
        self.start_date = date.to_string();
    }

    pub fn set_end_date(&mut self, date: &str) {
        self.end_date = date.to_string();
    }

    pub fn toggle_account(&mut self, account: &str) {
        toggle_value(&mut self.accounts, account);
    }

    pub fn toggle_industry(&mut self, industry: &str) {
        toggle_value(&mut self.industries, industry);
    }

    pub fn toggle_state(&mut self, state: &str) {
        toggle_value(&mut self.states, state);
    }

    pub fn set_accounts(&mut self, accounts: Vec<String>) {
        self.accounts = accounts;
    }

    pub fn set_industries(&mut self, industries: Vec<String>) {
        self.industries = industries;
    }

    pub fn set_states(&mut self, states: Vec<String>) {
        self.states = states;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        !self.start_date.is_empty()
            || !self.end_date.is_empty()
            || !self.accounts.is_empty()
            || !self.industries.is_empty()
            || !self.states.is_empty()
    }
}

fn toggle_value(values: &mut Vec<String>, value: &str) {
    if let Some(position) = values.iter().position(|existing| existing == value) {
        values.remove(position);
    } else {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterSpec, Transaction, TransactionType};

    #[test]
    fn toggling_twice_restores_the_selection() {
        let mut spec = FilterSpec::default();
        spec.toggle_account("Acme Corp");
        spec.toggle_account("Beta Inc");
        assert_eq!(spec.accounts, vec!["Acme Corp", "Beta Inc"]);

        spec.toggle_account("Acme Corp");
        assert_eq!(spec.accounts, vec!["Beta Inc"]);
    }

    #[test]
    fn reset_clears_every_constraint() {
        let mut spec = FilterSpec::default();
        assert!(!spec.is_active());

        spec.set_start_date("2023-01-01");
        spec.toggle_state("CA");
        assert!(spec.is_active());

        spec.reset();
        assert_eq!(spec, FilterSpec::default());
        assert!(!spec.is_active());
    }

    #[test]
    fn filter_spec_uses_camel_case_keys_and_tolerates_missing_fields() {
        let parsed = serde_json::from_str::<FilterSpec>(r#"{"startDate":"2023-01-01","states":["CA"]}"#);
        assert!(parsed.is_ok());
        if let Ok(spec) = parsed {
            assert_eq!(spec.start_date, "2023-01-01");
            assert!(spec.end_date.is_empty());
            assert_eq!(spec.states, vec!["CA"]);
        }
    }

    #[test]
    fn transaction_serializes_type_in_lowercase() {
        let transaction = Transaction {
            id: "txn-0".to_string(),
            date: "2023-06-15".to_string(),
            amount: 55.65,
            kind: TransactionType::Expense,
            currency: "usd".to_string(),
            account: "Acme Corp".to_string(),
            industry: "Technology".to_string(),
            state: "CA".to_string(),
        };
        assert_eq!(transaction.month_key(), "2023-06");

        let value = serde_json::to_value(&transaction);
        assert!(value.is_ok());
        if let Ok(json) = value {
            assert_eq!(json["type"], "expense");
        }
    }
}
