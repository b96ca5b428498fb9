use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use finboard_core::ledger::{DEFAULT_PAGE_SIZE, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !well_formed {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_sort_key(value: &str) -> Result<SortKey, String> {
    SortKey::parse(value).ok_or_else(|| {
        "sort key must be one of: date, account, industry, state, type, amount".to_string()
    })
}

pub fn parse_filter_field(value: &str) -> Result<String, String> {
    match value {
        "account" | "industry" | "state" => Ok(value.to_string()),
        _ => Err("field must be one of: account, industry, state".to_string()),
    }
}

fn parse_page(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number),
        _ => Err("must be a whole number of at least 1".to_string()),
    }
}

/// Shown after `finboard metrics --help` and the other data commands.
pub const SOURCE_AFTER_HELP: &str = "\
Transaction Source:
  <source> is a local JSON or CSV file. Use `-` (or omit it) to read stdin.
  Example: cat rows.json | finboard metrics -

  JSON: one top-level array of provider records
  [
    {
      \"date\": 1641772800000,
      \"amount\": \"5565\",
      \"transaction_type\": \"deposit\",
      \"currency\": \"brl\",
      \"account\": \"Acme Corp\",
      \"industry\": \"Technology\",
      \"state\": \"CA\"
    }
  ]

  CSV: a header row with exactly these fields
  date,amount,transaction_type,currency,account,industry,state

Field rules:
  date              Epoch milliseconds (UTC). Rows without a numeric date are skipped.
  amount            Integer cent count, as text or number. Malformed values count as 0.
  transaction_type  `deposit` is revenue; anything else is an expense.

Stored filters (see `finboard filters --help`) apply to metrics, monthly and table.
";

#[derive(Debug, Parser)]
#[command(
    name = "finboard",
    version,
    about = "transaction filtering and aggregation for a financial dashboard",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a dashboard session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// End the current dashboard session
    Logout {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the current dashboard session
    Whoami {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Inspect or change the stored dashboard filters
    #[command(arg_required_else_help = true)]
    Filters {
        #[command(subcommand)]
        command: FiltersCommand,
    },
    /// Revenue, expenses, balance and count of the filtered transactions
    #[command(after_long_help = SOURCE_AFTER_HELP)]
    Metrics {
        /// Path to a JSON or CSV transaction file (use `-` for stdin)
        source: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Month-by-month revenue, expenses and running balance
    #[command(after_long_help = SOURCE_AFTER_HELP)]
    Monthly {
        /// Path to a JSON or CSV transaction file (use `-` for stdin)
        source: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Search, sort and page through the filtered transactions
    #[command(after_long_help = SOURCE_AFTER_HELP)]
    Table {
        /// Path to a JSON or CSV transaction file (use `-` for stdin)
        source: Option<String>,
        /// Case-insensitive match on account, industry or state
        #[arg(long)]
        search: Option<String>,
        /// Sort column: date, account, industry, state, type or amount
        #[arg(long, value_parser = parse_sort_key)]
        sort: Option<SortKey>,
        /// Sort descending (requires --sort)
        #[arg(long)]
        desc: bool,
        /// Page to show; out-of-range pages are clamped
        #[arg(long, default_value_t = 1, value_parser = parse_page)]
        page: usize,
        /// Rows per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page)]
        page_size: usize,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Distinct accounts, industries, states and date span of the source
    #[command(after_long_help = SOURCE_AFTER_HELP)]
    Facets {
        /// Path to a JSON or CSV transaction file (use `-` for stdin)
        source: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum FiltersCommand {
    /// Show the stored filters
    Show {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Replace the given filter fields; omitted fields keep their value
    Set {
        /// Earliest included date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// Latest included date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Remove both date bounds
        #[arg(long, conflicts_with_all = ["from", "to"])]
        clear_dates: bool,
        /// Include this account (repeatable)
        #[arg(long = "account")]
        accounts: Vec<String>,
        /// Remove the account restriction
        #[arg(long, conflicts_with = "accounts")]
        clear_accounts: bool,
        /// Include this industry (repeatable)
        #[arg(long = "industry")]
        industries: Vec<String>,
        /// Remove the industry restriction
        #[arg(long, conflicts_with = "industries")]
        clear_industries: bool,
        /// Include this state (repeatable)
        #[arg(long = "state")]
        states: Vec<String>,
        /// Remove the state restriction
        #[arg(long, conflicts_with = "states")]
        clear_states: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Add a label to the filter, or remove it if already present
    Toggle {
        /// account, industry or state
        #[arg(value_parser = parse_filter_field)]
        field: String,
        value: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Clear every filter
    Reset {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
