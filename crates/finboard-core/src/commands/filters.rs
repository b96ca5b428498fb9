use std::path::Path;

use crate::commands::common::require_session;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::FiltersData;
use crate::ledger::FilterSpec;
use crate::ledger::date::validate_range;
use crate::state::filters_path;
use crate::store::{load_filters, save_filters};
use crate::{ClientError, ClientResult};

/// A label dimension that can be toggled in or out of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Account,
    Industry,
    State,
}

impl FilterField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "account" => Some(Self::Account),
            "industry" => Some(Self::Industry),
            "state" => Some(Self::State),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Industry => "industry",
            Self::State => "state",
        }
    }
}

/// Fields left as `None` keep their stored value. An empty date clears that
/// bound.
#[derive(Debug, Clone, Default)]
pub struct FiltersSetOptions<'a> {
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
    pub accounts: Option<Vec<String>>,
    pub industries: Option<Vec<String>>,
    pub states: Option<Vec<String>>,
    pub home_override: Option<&'a Path>,
}

pub fn show() -> ClientResult<SuccessEnvelope> {
    show_with_home_override(None)
}

#[doc(hidden)]
pub fn show_with_home_override(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let context = require_session(home_override)?;
    let filters = load_filters(&context.home);
    success("filters show", filters_data(&context.home, filters))
}

pub fn set(options: FiltersSetOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = require_session(options.home_override)?;
    let mut filters = load_filters(&context.home);

    let from = options.from.unwrap_or(filters.start_date.as_str()).to_string();
    let to = options.to.unwrap_or(filters.end_date.as_str()).to_string();
    let (from, to) = validate_range(non_empty(&from), non_empty(&to), "filters set")?;
    filters.set_start_date(from.as_deref().unwrap_or_default());
    filters.set_end_date(to.as_deref().unwrap_or_default());

    if let Some(accounts) = options.accounts {
        filters.set_accounts(dedupe_labels(accounts));
    }
    if let Some(industries) = options.industries {
        filters.set_industries(dedupe_labels(industries));
    }
    if let Some(states) = options.states {
        filters.set_states(dedupe_labels(states));
    }

    save_filters(&context.home, &filters)?;
    tracing::debug!(active = filters.is_active(), "stored dashboard filters");
    success("filters set", filters_data(&context.home, filters))
}

pub fn toggle(field: &str, value: &str) -> ClientResult<SuccessEnvelope> {
    toggle_with_home_override(field, value, None)
}

#[doc(hidden)]
pub fn toggle_with_home_override(
    field: &str,
    value: &str,
    home_override: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    let Some(field) = FilterField::parse(field) else {
        return Err(ClientError::invalid_argument_for_command(
            &format!("Unknown filter field `{field}`. Use account, industry or state."),
            Some("filters toggle"),
        ));
    };

    let context = require_session(home_override)?;
    let mut filters = load_filters(&context.home);
    match field {
        FilterField::Account => filters.toggle_account(value),
        FilterField::Industry => filters.toggle_industry(value),
        FilterField::State => filters.toggle_state(value),
    }

    save_filters(&context.home, &filters)?;
    tracing::debug!(field = field.as_str(), value, "toggled dashboard filter");
    success("filters toggle", filters_data(&context.home, filters))
}

pub fn reset() -> ClientResult<SuccessEnvelope> {
    reset_with_home_override(None)
}

#[doc(hidden)]
pub fn reset_with_home_override(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let context = require_session(home_override)?;
    let mut filters = load_filters(&context.home);
    filters.reset();
    save_filters(&context.home, &filters)?;
    success("filters reset", filters_data(&context.home, filters))
}

fn filters_data(home: &Path, filters: FilterSpec) -> FiltersData {
    FiltersData {
        active: filters.is_active(),
        filters,
        state_path: filters_path(home).display().to_string(),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

fn dedupe_labels(values: Vec<String>) -> Vec<String> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
