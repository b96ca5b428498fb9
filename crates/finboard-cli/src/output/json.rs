use std::io;

use finboard_core::contracts::envelope::failure_from_error;
use finboard_core::{ClientError, SuccessEnvelope};
use serde::Serialize;

/// Emits the full success envelope so scripts can check `ok` and `command`.
pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(success)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
