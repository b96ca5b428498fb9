use std::io;

use serde_json::{Map, Value};

use super::format;

pub fn render_session(command: &str, data: &Value) -> io::Result<String> {
    let authenticated = data
        .get("authenticated")
        .and_then(Value::as_bool)
        .ok_or_else(|| io::Error::other("session output requires authenticated"))?;

    if !authenticated {
        return Ok([
            "Not logged in.",
            "",
            "Log in first:",
            "  finboard login --email <email> --password <password>",
        ]
        .join("\n"));
    }

    let user = data.get("user").and_then(Value::as_object);
    let field = |key: &str| {
        user.and_then(|object| object.get(key))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let heading = if command == "login" {
        format!("Logged in as {}.", field("name"))
    } else {
        "Current session:".to_string()
    };

    let mut lines = vec![heading, String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Name:", field("name")),
            ("Email:", field("email")),
            (
                "Logged in at:",
                data.get("logged_at")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            ),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_logout(data: &Value) -> io::Result<String> {
    let cleared = data
        .get("session_cleared")
        .and_then(Value::as_bool)
        .ok_or_else(|| io::Error::other("logout output requires session_cleared"))?;
    if cleared {
        return Ok("Logged out.".to_string());
    }
    Ok("No active session; nothing to log out.".to_string())
}

pub fn render_filters(command: &str, data: &Value) -> io::Result<String> {
    let filters = data
        .get("filters")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("filters output requires filters"))?;
    let active = data.get("active").and_then(Value::as_bool).unwrap_or(false);

    let heading = match command {
        "filters reset" => "Filters cleared.",
        "filters set" | "filters toggle" => "Filters updated.",
        _ => "Dashboard filters:",
    };
    let mut lines = vec![heading.to_string(), String::new()];
    if active {
        lines.extend(filter_rows(filters));
    } else {
        lines.push("  No filters active; every transaction is included.".to_string());
    }
    Ok(lines.join("\n"))
}

pub(super) fn filter_rows(filters: &Map<String, Value>) -> Vec<String> {
    let text = |key: &str| {
        filters
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(format::format_display_date)
            .unwrap_or_else(|| "any".to_string())
    };
    let labels = |key: &str| {
        let values = filters
            .get(key)
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<&str>>()
            })
            .unwrap_or_default();
        if values.is_empty() {
            "all".to_string()
        } else {
            values.join(", ")
        }
    };

    format::key_value_rows(
        &[
            ("From:", text("startDate")),
            ("To:", text("endDate")),
            ("Accounts:", labels("accounts")),
            ("Industries:", labels("industries")),
            ("States:", labels("states")),
        ],
        2,
    )
}
