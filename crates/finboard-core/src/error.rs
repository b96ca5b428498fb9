use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const SOURCE_HELP_COMMAND: &str = "finboard metrics --help";
pub(crate) const SOURCE_HELP_SECTION_TITLE: &str = "Transaction Source";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_source_help(self) -> Self {
        self.with_source_help_data(json!({}))
    }

    pub fn with_source_help_data(self, data: Value) -> Self {
        self.with_data(merge_source_help_data(data))
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `finboard {cmd} --help` for usage."),
            None => "Run `finboard --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    /// A raw record whose date cannot become a calendar day.
    pub fn invalid_record(index: usize, detail: &str) -> Self {
        Self::new(
            "invalid_record",
            &format!("Transaction record {index} is invalid: {detail}"),
            vec!["Fix the record's `date` field to a valid epoch millisecond value.".to_string()],
        )
        .with_data(json!({
            "record_index": index,
        }))
    }

    pub fn invalid_source_format(message: &str, received_format: &str) -> Self {
        Self::new(
            "invalid_source_format",
            message,
            vec![
                "Provide a supported source format (JSON array or CSV).".to_string(),
                format!("Run `{SOURCE_HELP_COMMAND}` to confirm field requirements."),
            ],
        )
        .with_source_help_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn source_schema_mismatch(expected_headers: Vec<String>, actual_headers: Vec<String>) -> Self {
        Self::new(
            "invalid_source_format",
            "CSV headers do not satisfy the transaction source schema.",
            vec![
                "Include every expected header exactly once.".to_string(),
                format!("Run `{SOURCE_HELP_COMMAND}` to review the source fields."),
            ],
        )
        .with_source_help_data(json!({
            "expected_headers": expected_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn not_authenticated() -> Self {
        Self::new(
            "not_authenticated",
            "No active session. Log in before reading dashboard data.",
            vec!["Run `finboard login --email <email> --password <password>`.".to_string()],
        )
    }

    pub fn invalid_credentials() -> Self {
        Self::new(
            "invalid_credentials",
            "Email or password is incorrect.",
            vec!["Check the credentials and rerun `finboard login`.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn state_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "state_write_failed",
            &format!("Cannot write dashboard state at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `FINBOARD_HOME` to a writable directory."
            )],
        )
    }

    pub fn state_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "state_init_failed",
            &format!("Dashboard state initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }
}

fn merge_source_help_data(mut data: Value) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(SOURCE_HELP_COMMAND.to_string()),
        );
        object.insert(
            "help_section_title".to_string(),
            Value::String(SOURCE_HELP_SECTION_TITLE.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;
