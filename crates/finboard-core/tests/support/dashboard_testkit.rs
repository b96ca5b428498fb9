use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use finboard_core::commands::common::SourceOptions;
use finboard_core::commands::session::{LoginRunOptions, run_login_with_options};
use finboard_core::session::StaticCredentials;
use finboard_core::{ClientResult, SuccessEnvelope};
use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

pub const ADMIN_EMAIL: &str = "admin@dashboard.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub fn temp_home(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir()?;
    let home = dir.path().join("dashboard-home");
    Ok((dir, home))
}

/// Logs in with the default credentials at a fixed instant.
pub fn login(home: &Path) {
    let verifier = StaticCredentials::default();
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).single();
    assert!(now.is_some());
    let result = run_login_with_options(LoginRunOptions {
        email: ADMIN_EMAIL,
        password: ADMIN_PASSWORD,
        home_override: Some(home),
        verifier: Some(&verifier),
        now,
    });
    assert!(result.is_ok());
}

pub fn stdin_source(home: &Path, body: String) -> SourceOptions<'_> {
    SourceOptions {
        path: Some("-"),
        home_override: Some(home),
        stdin_override: Some(body),
    }
}

pub fn write_source(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    assert!(fs::write(&path, body).is_ok());
    path
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(value) = value {
            return value;
        }
    }
    Value::Null
}

/// Epoch milliseconds for midnight UTC of the given day.
pub fn epoch_ms(year: i32, month: u32, day: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .map(|instant| instant.timestamp_millis())
        .unwrap_or_default()
}

pub fn record(
    date: i64,
    cents: &str,
    kind: &str,
    account: &str,
    industry: &str,
    state: &str,
) -> Value {
    json!({
        "date": date,
        "amount": cents,
        "transaction_type": kind,
        "currency": "usd",
        "account": account,
        "industry": industry,
        "state": state,
    })
}

/// The four-record sample used across dashboard tests.
pub fn sample_records() -> Vec<Value> {
    vec![
        record(epoch_ms(2022, 1, 10), "100000", "deposit", "Acme Corp", "Technology", "CA"),
        record(epoch_ms(2022, 6, 20), "25000", "withdraw", "Beta Inc", "Hotels", "NY"),
        record(epoch_ms(2023, 3, 5), "50000", "deposit", "Acme Corp", "Technology", "TX"),
        record(epoch_ms(2023, 11, 30), "12345", "withdraw", "Gamma Ltd", "Airlines", "FL"),
    ]
}

pub fn sample_json() -> String {
    Value::Array(sample_records()).to_string()
}
