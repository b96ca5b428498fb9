use std::io;

use serde_json::{Map, Value};

use super::format::{self, Align, Column};

pub fn render_metrics(data: &Value) -> io::Result<String> {
    let metrics = object_field(data, "metrics", "metrics")?;
    let revenue = number(metrics, "revenue");
    let expenses = number(metrics, "expenses");
    let balance = number(metrics, "balance");

    let mut lines = vec!["Dashboard metrics:".to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Revenue:", format::format_currency(revenue)),
            ("Expenses:", format::format_currency(expenses)),
            ("Balance:", format::format_currency(balance)),
            ("Transactions:", count(metrics, "total").to_string()),
        ],
        2,
    ));
    lines.extend(render_filter_footer(data));
    lines.extend(render_source_footer(data));
    Ok(lines.join("\n"))
}

pub fn render_monthly(data: &Value) -> io::Result<String> {
    let series = object_field(data, "series", "monthly")?;
    let months = strings(series, "months");
    let incomes = numbers(series, "incomes");
    let expenses = numbers(series, "expenses");
    let balances = numbers(series, "balances");

    let mut lines = vec!["Monthly revenue and expenses:".to_string(), String::new()];
    if months.is_empty() {
        lines.push("  No transactions match the current filters.".to_string());
    } else {
        let columns = [
            Column {
                name: "Month",
                align: Align::Left,
            },
            Column {
                name: "Revenue",
                align: Align::Right,
            },
            Column {
                name: "Expenses",
                align: Align::Right,
            },
            Column {
                name: "Balance",
                align: Align::Right,
            },
        ];
        let rows = months
            .iter()
            .enumerate()
            .map(|(index, month)| {
                vec![
                    month.clone(),
                    currency_at(&incomes, index),
                    currency_at(&expenses, index),
                    currency_at(&balances, index),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table_or_blocks(
            &columns,
            &rows,
            format::terminal_width(),
            "Month",
        ));
    }
    lines.extend(render_filter_footer(data));
    lines.extend(render_source_footer(data));
    Ok(lines.join("\n"))
}

pub fn render_table(data: &Value) -> io::Result<String> {
    let table = object_field(data, "table", "table")?;
    let rows = table
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("table output requires rows"))?;
    let page = count(table, "page");
    let total_pages = count(table, "total_pages");
    let total_rows = count(table, "total_rows");

    let mut lines = vec![format!(
        "Transactions (page {page} of {total_pages}, {total_rows} matching):"
    )];
    if let Some(search) = data.get("search").and_then(Value::as_str)
        && !search.trim().is_empty()
    {
        lines.push(format!("  Search: \"{search}\""));
    }
    if let Some(sort) = data.get("sort").and_then(Value::as_object) {
        let key = sort.get("key").and_then(Value::as_str).unwrap_or("date");
        let direction = sort.get("direction").and_then(Value::as_str).unwrap_or("asc");
        lines.push(format!("  Sorted by {key} ({direction})"));
    }
    lines.push(String::new());

    if rows.is_empty() {
        lines.push("  No transactions found.".to_string());
    } else {
        let columns = [
            Column {
                name: "Date",
                align: Align::Left,
            },
            Column {
                name: "Account",
                align: Align::Left,
            },
            Column {
                name: "Industry",
                align: Align::Left,
            },
            Column {
                name: "State",
                align: Align::Left,
            },
            Column {
                name: "Type",
                align: Align::Left,
            },
            Column {
                name: "Amount",
                align: Align::Right,
            },
        ];
        let cells = rows.iter().map(table_row).collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table_or_blocks(
            &columns,
            &cells,
            format::terminal_width(),
            "Transaction",
        ));
    }

    let page_numbers = table
        .get("page_numbers")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_u64)
                .map(|number| {
                    if number as usize == page {
                        format!("[{number}]")
                    } else {
                        number.to_string()
                    }
                })
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    if total_pages > 1 && !page_numbers.is_empty() {
        lines.push(String::new());
        lines.push(format!("  Pages: {}", page_numbers.join(" ")));
    }

    lines.extend(render_filter_footer(data));
    lines.extend(render_source_footer(data));
    Ok(lines.join("\n"))
}

pub fn render_facets(data: &Value) -> io::Result<String> {
    let facets = object_field(data, "facets", "facets")?;
    let date_span = match (
        facets.get("min_date").and_then(Value::as_str),
        facets.get("max_date").and_then(Value::as_str),
    ) {
        (Some(min), Some(max)) => format!(
            "{} to {}",
            format::format_display_date(min),
            format::format_display_date(max)
        ),
        _ => "none".to_string(),
    };

    let mut lines = vec!["Available filter values:".to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Date span:", date_span),
            ("Accounts:", joined_or_none(&strings(facets, "accounts"))),
            ("Industries:", joined_or_none(&strings(facets, "industries"))),
            ("States:", joined_or_none(&strings(facets, "states"))),
        ],
        2,
    ));
    lines.extend(render_source_footer(data));
    Ok(lines.join("\n"))
}

fn table_row(row: &Value) -> Vec<String> {
    let text = |key: &str| {
        row.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let is_income = text("type") == "income";
    let amount = format::format_currency(row.get("amount").and_then(Value::as_f64).unwrap_or(0.0));

    vec![
        format::format_display_date(&text("date")),
        text("account"),
        text("industry"),
        text("state"),
        if is_income { "Revenue" } else { "Expense" }.to_string(),
        format!("{}{amount}", if is_income { "+" } else { "-" }),
    ]
}

fn render_filter_footer(data: &Value) -> Vec<String> {
    let active = data
        .get("filters_active")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !active {
        return Vec::new();
    }
    let Some(filters) = data.get("filters").and_then(Value::as_object) else {
        return Vec::new();
    };
    let mut lines = vec![String::new(), "Active filters:".to_string()];
    lines.extend(super::session_text::filter_rows(filters));
    lines
}

fn render_source_footer(data: &Value) -> Vec<String> {
    let Some(source) = data.get("source").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut lines = vec![
        String::new(),
        format!(
            "Source: {} rows read, {} loaded, {} rejected.",
            count(source, "rows_read"),
            count(source, "transactions_loaded"),
            count(source, "rejected_count"),
        ),
    ];
    if let Some(rejected) = source.get("rejected").and_then(Value::as_array) {
        for record in rejected {
            let reason = record
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("invalid record");
            lines.push(format!("  - {reason}"));
        }
    }
    lines
}

fn object_field<'a>(
    data: &'a Value,
    key: &str,
    command: &str,
) -> io::Result<&'a Map<String, Value>> {
    data.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other(format!("{command} output requires {key}")))
}

fn number(object: &Map<String, Value>, key: &str) -> f64 {
    object.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn count(object: &Map<String, Value>, key: &str) -> usize {
    object.get(key).and_then(Value::as_u64).unwrap_or(0) as usize
}

fn numbers(object: &Map<String, Value>, key: &str) -> Vec<f64> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default()
}

fn strings(object: &Map<String, Value>, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn currency_at(values: &[f64], index: usize) -> String {
    format::format_currency(values.get(index).copied().unwrap_or(0.0))
}

fn joined_or_none(values: &[String]) -> String {
    if values.is_empty() {
        return "none".to_string();
    }
    values.join(", ")
}
