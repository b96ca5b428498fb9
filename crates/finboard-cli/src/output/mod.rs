mod dashboard_text;
mod error_text;
mod format;
mod json;
mod mode;
mod session_text;

use std::io;

use finboard_core::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "login" | "whoami" => session_text::render_session(&success.command, &success.data),
        "logout" => session_text::render_logout(&success.data),
        "filters show" | "filters set" | "filters toggle" | "filters reset" => {
            session_text::render_filters(&success.command, &success.data)
        }
        "metrics" => dashboard_text::render_metrics(&success.data),
        "monthly" => dashboard_text::render_monthly(&success.data),
        "table" => dashboard_text::render_table(&success.data),
        "facets" => dashboard_text::render_facets(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
