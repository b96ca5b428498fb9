mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use finboard_core::ClientError;
use stdout_io::write_stdout_text;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "FINBOARD_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

const ROOT_HELP: &str = "finboard - transaction filtering and aggregation for a financial dashboard

Usage:
  finboard <command>

Start here:
  finboard login --email <email> --password <password>
  finboard metrics <source>
  finboard metrics --help
";

const TOP_LEVEL_HELP: &str = "finboard - transaction filtering and aggregation for a financial dashboard

USAGE: finboard <command>

Session:
  finboard login --email <email> --password <password>    Start a dashboard session
  finboard whoami                                          Show the current session
  finboard logout                                          End the session

Dashboard views (read a JSON/CSV source file, or `-` for stdin):
  finboard metrics <source>                                Revenue, expenses, balance, count
  finboard monthly <source>                                Monthly series with running balance
  finboard table <source> [--search] [--sort] [--page]     Searchable, sortable transaction pages
  finboard facets <source>                                 Selectable accounts, industries, states

Filters (persisted between runs, applied to metrics/monthly/table):
  finboard filters show
  finboard filters set --from 2023-01-01 --state CA
  finboard filters toggle industry Hotels
  finboard filters reset

Add --json to any command for machine-readable output.
Set FINBOARD_LOG=debug for diagnostics on stderr.
";

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return parse_exit(handle_parse_error(&raw_args, &err)),
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Help and version requests end successfully; every other parse error is a
/// user error rendered in the requested output mode.
fn handle_parse_error(raw_args: &[String], err: &clap::Error) -> ParseOutcome {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        let text = if is_top_level_help_request(raw_args) {
            TOP_LEVEL_HELP.to_string()
        } else {
            err.to_string()
        };
        if write_stdout_text(&text).is_err() {
            return ParseOutcome::Failed(ExitCode::from(2));
        }
        return ParseOutcome::Shown;
    }

    let command_hint = if matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::ArgumentConflict
            | ErrorKind::UnknownArgument
            | ErrorKind::InvalidSubcommand
    ) {
        command_path_from_args(raw_args)
    } else {
        None
    };
    let parse_error = ClientError::invalid_argument_for_command(
        &strip_clap_boilerplate(&err.to_string()),
        command_hint,
    );
    let mode = infer_requested_output_mode(raw_args);
    if output::print_failure(&parse_error, mode).is_err() {
        return ParseOutcome::Failed(ExitCode::from(2));
    }
    ParseOutcome::Failed(ExitCode::from(1))
}

enum ParseOutcome {
    Shown,
    Failed(ExitCode),
}

fn parse_exit(outcome: ParseOutcome) -> Result<ExitCode, ExitCode> {
    match outcome {
        ParseOutcome::Shown => Ok(ExitCode::SUCCESS),
        ParseOutcome::Failed(code) => Err(code),
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing usage lines so the recovery steps are the only
/// guidance printed.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_path_from_args(raw_args: &[String]) -> Option<&'static str> {
    let non_flags = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect::<Vec<&str>>();

    match non_flags.as_slice() {
        ["filters", "show", ..] => Some("filters show"),
        ["filters", "set", ..] => Some("filters set"),
        ["filters", "toggle", ..] => Some("filters toggle"),
        ["filters", "reset", ..] => Some("filters reset"),
        ["filters", ..] => Some("filters"),
        ["login", ..] => Some("login"),
        ["logout", ..] => Some("logout"),
        ["whoami", ..] => Some("whoami"),
        ["metrics", ..] => Some("metrics"),
        ["monthly", ..] => Some("monthly"),
        ["table", ..] => Some("table"),
        ["facets", ..] => Some("facets"),
        _ => None,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "state_write_failed" | "state_init_failed"
        )
}
