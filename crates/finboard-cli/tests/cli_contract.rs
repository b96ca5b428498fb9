use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;

const ROWS_JSON: &str = r#"[
  {"date": 1673740800000, "amount": "30000", "transaction_type": "deposit",
   "currency": "usd", "account": "Acme Corp", "industry": "Technology", "state": "CA"},
  {"date": 1676419200000, "amount": "5000", "transaction_type": "withdraw",
   "currency": "usd", "account": "Beta Inc", "industry": "Hotels", "state": "NY"},
  {"date": "not-a-date", "amount": "100", "transaction_type": "deposit",
   "currency": "usd", "account": "Gamma Ltd", "industry": "Airlines", "state": "TX"}
]"#;

struct CliRun {
    success: bool,
    code: Option<i32>,
    stdout: String,
}

fn run_cli(home: &Path, args: &[&str], input: Option<&str>) -> CliRun {
    let mut command = Command::new(env!("CARGO_BIN_EXE_finboard"));
    command
        .args(args)
        .env("FINBOARD_HOME", home)
        .env_remove("FINBOARD_ADMIN_EMAIL")
        .env_remove("FINBOARD_ADMIN_PASSWORD")
        .env_remove("FINBOARD_ADMIN_NAME")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if input.is_some() {
        command.stdin(Stdio::piped());
    } else {
        command.stdin(Stdio::null());
    }

    let spawned = command.spawn();
    assert!(spawned.is_ok());
    if let Ok(mut child) = spawned {
        if let Some(body) = input
            && let Some(mut pipe) = child.stdin.take()
        {
            assert!(pipe.write_all(body.as_bytes()).is_ok());
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            return CliRun {
                success: result.status.success(),
                code: result.status.code(),
                stdout: String::from_utf8_lossy(&result.stdout).to_string(),
            };
        }
    }

    CliRun {
        success: false,
        code: None,
        stdout: String::new(),
    }
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "not JSON: {body}");
    parsed.unwrap_or(Value::Null)
}

fn login(home: &Path) {
    let run = run_cli(
        home,
        &["login", "--email", "admin@dashboard.com", "--password", "admin123"],
        None,
    );
    assert!(run.success, "login failed: {}", run.stdout);
}

fn with_home(test: impl FnOnce(&Path)) {
    let temp = tempfile::tempdir();
    assert!(temp.is_ok());
    if let Ok(dir) = temp {
        test(dir.path());
    }
}

fn write_rows(home: &Path) -> String {
    let path = home.join("rows.json");
    assert!(std::fs::write(&path, ROWS_JSON).is_ok());
    path.display().to_string()
}

#[test]
fn root_command_prints_short_help() {
    with_home(|home| {
        let run = run_cli(home, &[], None);
        assert!(run.success);
        assert!(run.stdout.starts_with("finboard - transaction filtering"));
    });
}

#[test]
fn top_level_help_lists_every_command_group() {
    with_home(|home| {
        let run = run_cli(home, &["--help"], None);
        assert!(run.success);
        for needle in ["Session:", "Dashboard views", "Filters", "--json"] {
            assert!(run.stdout.contains(needle), "missing {needle}");
        }
    });
}

#[test]
fn data_commands_require_a_session() {
    with_home(|home| {
        let rows = write_rows(home);
        let text = run_cli(home, &["metrics", &rows], None);
        assert_eq!(text.code, Some(1));
        assert!(text.stdout.contains("Error (not_authenticated)"));

        let json = run_cli(home, &["metrics", &rows, "--json"], None);
        assert_eq!(json.code, Some(1));
        let payload = parse_json(&json.stdout);
        assert_eq!(payload["ok"], Value::Bool(false));
        assert_eq!(payload["error"]["code"], "not_authenticated");
    });
}

#[test]
fn wrong_credentials_are_rejected() {
    with_home(|home| {
        let run = run_cli(
            home,
            &["login", "--email", "admin@dashboard.com", "--password", "nope", "--json"],
            None,
        );
        assert_eq!(run.code, Some(1));
        assert_eq!(parse_json(&run.stdout)["error"]["code"], "invalid_credentials");

        let whoami = run_cli(home, &["whoami", "--json"], None);
        assert!(whoami.success);
        assert_eq!(parse_json(&whoami.stdout)["data"]["authenticated"], false);
    });
}

#[test]
fn metrics_follow_stored_filters() {
    with_home(|home| {
        login(home);
        let rows = write_rows(home);

        let all = run_cli(home, &["metrics", &rows, "--json"], None);
        assert!(all.success);
        let payload = parse_json(&all.stdout);
        assert_eq!(payload["command"], "metrics");
        assert_eq!(payload["data"]["metrics"]["revenue"], serde_json::json!(300.0));
        assert_eq!(payload["data"]["metrics"]["expenses"], serde_json::json!(50.0));
        assert_eq!(payload["data"]["metrics"]["total"], 2);
        assert_eq!(payload["data"]["source"]["rejected_count"], 1);

        let set = run_cli(home, &["filters", "toggle", "state", "NY"], None);
        assert!(set.success);

        let filtered = run_cli(home, &["metrics", &rows, "--json"], None);
        let payload = parse_json(&filtered.stdout);
        assert_eq!(payload["data"]["metrics"]["total"], 1);
        assert_eq!(payload["data"]["metrics"]["balance"], serde_json::json!(-50.0));
        assert_eq!(payload["data"]["filters_active"], true);
    });
}

#[test]
fn monthly_and_table_render_plaintext() {
    with_home(|home| {
        login(home);
        let rows = write_rows(home);

        let monthly = run_cli(home, &["monthly", &rows], None);
        assert!(monthly.success);
        assert!(monthly.stdout.contains("Jan 23"));
        assert!(monthly.stdout.contains("Feb 23"));
        assert!(monthly.stdout.contains("$250.00"));

        let table = run_cli(home, &["table", &rows, "--sort", "amount", "--desc"], None);
        assert!(table.success);
        assert!(table.stdout.contains("page 1 of 1, 2 matching"));
        assert!(table.stdout.contains("+$300.00"));
        assert!(table.stdout.contains("-$50.00"));
    });
}

#[test]
fn facets_ignore_stored_filters() {
    with_home(|home| {
        login(home);
        let rows = write_rows(home);
        assert!(run_cli(home, &["filters", "set", "--state", "CA"], None).success);

        let run = run_cli(home, &["facets", &rows, "--json"], None);
        assert!(run.success);
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["data"]["facets"]["states"], serde_json::json!(["CA", "NY"]));
    });
}

#[test]
fn source_can_be_piped_on_stdin() {
    with_home(|home| {
        login(home);
        let run = run_cli(home, &["facets", "-", "--json"], Some(ROWS_JSON));
        assert!(run.success);
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["data"]["source"]["source_kind"], "stdin");
    });
}

#[test]
fn clear_flag_drops_one_label_dimension() {
    with_home(|home| {
        login(home);
        assert!(
            run_cli(
                home,
                &["filters", "set", "--state", "CA", "--industry", "Hotels"],
                None
            )
            .success
        );

        let run = run_cli(home, &["filters", "set", "--clear-states", "--json"], None);
        assert!(run.success);
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["data"]["filters"]["states"], serde_json::json!([]));
        assert_eq!(
            payload["data"]["filters"]["industries"],
            serde_json::json!(["Hotels"])
        );
    });
}

#[test]
fn invalid_filter_range_is_a_user_error() {
    with_home(|home| {
        login(home);
        let run = run_cli(
            home,
            &["filters", "set", "--from", "2023-05-01", "--to", "2023-01-01", "--json"],
            None,
        );
        assert_eq!(run.code, Some(1));
        assert_eq!(parse_json(&run.stdout)["error"]["code"], "invalid_argument");
    });
}

#[test]
fn parse_errors_honor_the_json_flag() {
    with_home(|home| {
        let run = run_cli(home, &["table", "--sort", "memo", "--json"], None);
        assert_eq!(run.code, Some(1));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["error"]["code"], "invalid_argument");
        assert_eq!(payload["error"]["recovery_steps"][0], "Run `finboard table --help` for usage.");
    });
}

#[test]
fn logout_clears_the_session() {
    with_home(|home| {
        login(home);
        let rows = write_rows(home);
        assert!(run_cli(home, &["logout"], None).stdout.contains("Logged out."));
        let run = run_cli(home, &["table", &rows], None);
        assert_eq!(run.code, Some(1));
    });
}

#[test]
fn closed_stdout_pipe_does_not_panic() {
    with_home(|home| {
        let mut command = Command::new(env!("CARGO_BIN_EXE_finboard"));
        command
            .arg("--help")
            .env("FINBOARD_HOME", home)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let spawned = command.spawn();
        assert!(spawned.is_ok());
        if let Ok(mut child) = spawned {
            if let Some(stdout) = child.stdout.take() {
                let mut reader = BufReader::new(stdout);
                let mut first_line = String::new();
                assert!(reader.read_line(&mut first_line).is_ok());
                drop(reader);
            }
            let output = child.wait_with_output();
            assert!(output.is_ok());
            if let Ok(result) = output {
                let stderr = String::from_utf8_lossy(&result.stderr);
                assert!(!stderr.contains("panicked"));
            }
        }
    });
}
