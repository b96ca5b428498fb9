use finboard_core::ClientError;
use serde_json::Value;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        format!("Error ({}): {}", error.code, error.message),
        String::new(),
        "Next steps:".to_string(),
    ];

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    let data = error.data.as_ref();
    if let Some(index) = data
        .and_then(|value| value.get("record_index"))
        .and_then(Value::as_u64)
    {
        lines.push(String::new());
        lines.push(format!("Offending record: #{index}"));
    }
    if let Some(headers) = data
        .and_then(|value| value.get("expected_headers"))
        .and_then(Value::as_array)
    {
        let names = headers
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<&str>>();
        lines.push(String::new());
        lines.push(format!("Expected CSV headers: {}", names.join(",")));
    }

    lines.join("\n")
}
