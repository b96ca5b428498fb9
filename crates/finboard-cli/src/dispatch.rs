use finboard_core::commands;
use finboard_core::commands::common::SourceOptions;
use finboard_core::commands::filters::FiltersSetOptions;
use finboard_core::commands::table::TableRunOptions;
use finboard_core::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, FiltersCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Login {
            email, password, ..
        } => commands::session::run_login(email, password),
        Commands::Logout { .. } => commands::session::run_logout(),
        Commands::Whoami { .. } => commands::session::run_whoami(),
        Commands::Filters { command } => dispatch_filters(command),
        Commands::Metrics { source, .. } => commands::metrics::run(source.as_deref()),
        Commands::Monthly { source, .. } => commands::monthly::run(source.as_deref()),
        Commands::Facets { source, .. } => commands::facets::run(source.as_deref()),
        Commands::Table {
            source,
            search,
            sort,
            desc,
            page,
            page_size,
            ..
        } => commands::table::run_with_options(TableRunOptions {
            source: SourceOptions {
                path: source.as_deref(),
                ..SourceOptions::default()
            },
            search: search.clone(),
            sort: *sort,
            descending: *desc,
            page: *page,
            page_size: *page_size,
        }),
    }
}

fn dispatch_filters(command: &FiltersCommand) -> ClientResult<SuccessEnvelope> {
    match command {
        FiltersCommand::Show { .. } => commands::filters::show(),
        FiltersCommand::Set {
            from,
            to,
            clear_dates,
            accounts,
            clear_accounts,
            industries,
            clear_industries,
            states,
            clear_states,
            ..
        } => {
            let (from, to) = if *clear_dates {
                (Some(""), Some(""))
            } else {
                (
                    from.as_ref().map(|value| value.as_str()),
                    to.as_ref().map(|value| value.as_str()),
                )
            };
            commands::filters::set(FiltersSetOptions {
                from,
                to,
                accounts: label_update(accounts, *clear_accounts),
                industries: label_update(industries, *clear_industries),
                states: label_update(states, *clear_states),
                home_override: None,
            })
        }
        FiltersCommand::Toggle { field, value, .. } => commands::filters::toggle(field, value),
        FiltersCommand::Reset { .. } => commands::filters::reset(),
    }
}

/// `None` keeps the stored labels; an empty list clears them.
fn label_update(values: &[String], clear: bool) -> Option<Vec<String>> {
    if clear {
        return Some(Vec::new());
    }
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}
