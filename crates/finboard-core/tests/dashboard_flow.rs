mod support;

use finboard_core::commands::filters::{
    self, FiltersSetOptions, reset_with_home_override, show_with_home_override,
    toggle_with_home_override,
};
use finboard_core::commands::session::{
    run_logout_with_home_override, run_whoami_with_home_override,
};
use finboard_core::commands::common::SourceOptions;
use finboard_core::commands::table::TableRunOptions;
use finboard_core::commands::{facets, metrics, monthly, table};
use finboard_core::ledger::SortKey;
use serde_json::Value;
use support::dashboard_testkit::{
    login, payload, sample_json, stdin_source, temp_home, write_source,
};

fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|actual| (actual - expected).abs() < 1e-9)
}

#[test]
fn data_commands_require_a_session() {
    let home = temp_home("finboard-no-session");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        let result = metrics::run_with_options(stdin_source(&home, sample_json()));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "not_authenticated");
        }

        let filters = show_with_home_override(Some(&home));
        assert!(filters.is_err());
    }
}

#[test]
fn login_whoami_logout_round_trip() {
    let home = temp_home("finboard-session");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);

        let whoami = payload(run_whoami_with_home_override(Some(&home)));
        assert_eq!(whoami["command"], "whoami");
        assert_eq!(whoami["data"]["authenticated"], true);
        assert_eq!(whoami["data"]["user"]["email"], "admin@dashboard.com");
        assert_eq!(whoami["data"]["logged_at"], "2023-11-14T22:13:20.000Z");

        let logout = payload(run_logout_with_home_override(Some(&home)));
        assert_eq!(logout["data"]["session_cleared"], true);

        let again = payload(run_logout_with_home_override(Some(&home)));
        assert_eq!(again["data"]["session_cleared"], false);

        let whoami = payload(run_whoami_with_home_override(Some(&home)));
        assert_eq!(whoami["data"]["authenticated"], false);
    }
}

#[test]
fn metrics_follow_stored_date_filter() {
    let home = temp_home("finboard-metrics");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);

        let unfiltered = payload(metrics::run_with_options(stdin_source(&home, sample_json())));
        assert_eq!(unfiltered["data"]["metrics"]["total"], 4);
        assert!(approx(&unfiltered["data"]["metrics"]["revenue"], 1500.0));
        assert_eq!(unfiltered["data"]["filters_active"], false);

        let stored = payload(filters::set(FiltersSetOptions {
            from: Some("2023-01-01"),
            home_override: Some(&home),
            ..FiltersSetOptions::default()
        }));
        assert_eq!(stored["data"]["filters"]["startDate"], "2023-01-01");
        assert_eq!(stored["data"]["active"], true);

        let filtered = payload(metrics::run_with_options(stdin_source(&home, sample_json())));
        let data = &filtered["data"]["metrics"];
        assert_eq!(data["total"], 2);
        assert!(approx(&data["revenue"], 500.0));
        assert!(approx(&data["expenses"], 123.45));
        assert!(approx(&data["balance"], 376.55));
        assert_eq!(filtered["data"]["filters_active"], true);
        assert_eq!(filtered["data"]["source"]["rows_read"], 4);
    }
}

#[test]
fn filters_set_merges_and_toggle_flips_membership() {
    let home = temp_home("finboard-filters");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);

        let first = filters::set(FiltersSetOptions {
            states: Some(vec!["CA".to_string(), "TX".to_string(), "CA".to_string()]),
            home_override: Some(&home),
            ..FiltersSetOptions::default()
        });
        assert!(first.is_ok());

        let second = payload(filters::set(FiltersSetOptions {
            to: Some("2023-06-30"),
            home_override: Some(&home),
            ..FiltersSetOptions::default()
        }));
        let stored = &second["data"]["filters"];
        assert_eq!(stored["states"], serde_json::json!(["CA", "TX"]));
        assert_eq!(stored["endDate"], "2023-06-30");

        let toggled = payload(toggle_with_home_override("state", "CA", Some(&home)));
        assert_eq!(
            toggled["data"]["filters"]["states"],
            serde_json::json!(["TX"])
        );
        let toggled = payload(toggle_with_home_override("industry", "Hotels", Some(&home)));
        assert_eq!(
            toggled["data"]["filters"]["industries"],
            serde_json::json!(["Hotels"])
        );

        let unknown = toggle_with_home_override("country", "BR", Some(&home));
        assert!(unknown.is_err());

        let cleared = payload(reset_with_home_override(Some(&home)));
        assert_eq!(cleared["data"]["active"], false);
        assert_eq!(cleared["data"]["filters"]["states"], serde_json::json!([]));
    }
}

#[test]
fn empty_label_list_clears_only_that_dimension() {
    let home = temp_home("finboard-clear-labels");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);
        let stored = filters::set(FiltersSetOptions {
            accounts: Some(vec!["Acme Corp".to_string()]),
            states: Some(vec!["CA".to_string()]),
            home_override: Some(&home),
            ..FiltersSetOptions::default()
        });
        assert!(stored.is_ok());

        let cleared = payload(filters::set(FiltersSetOptions {
            accounts: Some(Vec::new()),
            home_override: Some(&home),
            ..FiltersSetOptions::default()
        }));
        let data = &cleared["data"]["filters"];
        assert_eq!(data["accounts"], serde_json::json!([]));
        assert_eq!(data["states"], serde_json::json!(["CA"]));
        assert_eq!(cleared["data"]["active"], true);
    }
}

#[test]
fn inverted_range_is_rejected_without_changing_stored_filters() {
    let home = temp_home("finboard-range");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);

        let result = filters::set(FiltersSetOptions {
            from: Some("2023-06-01"),
            to: Some("2023-01-01"),
            home_override: Some(&home),
            ..FiltersSetOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
        }

        let shown = payload(show_with_home_override(Some(&home)));
        assert_eq!(shown["data"]["active"], false);
    }
}

#[test]
fn monthly_series_carries_running_balance() {
    let home = temp_home("finboard-monthly");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);

        let envelope = payload(monthly::run_with_options(stdin_source(&home, sample_json())));
        let series = &envelope["data"]["series"];
        assert_eq!(
            series["keys"],
            serde_json::json!(["2022-01", "2022-06", "2023-03", "2023-11"])
        );
        assert_eq!(
            series["months"],
            serde_json::json!(["Jan 22", "Jun 22", "Mar 23", "Nov 23"])
        );
        assert!(approx(&series["balances"][0], 1000.0));
        assert!(approx(&series["balances"][1], 750.0));
        assert!(approx(&series["balances"][2], 1250.0));
        assert!(approx(&series["balances"][3], 1126.55));
    }
}

#[test]
fn table_searches_sorts_and_pages() {
    let home = temp_home("finboard-table");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);

        let searched = payload(table::run_with_options(TableRunOptions {
            source: stdin_source(&home, sample_json()),
            search: Some("acme".to_string()),
            ..TableRunOptions::default()
        }));
        assert_eq!(searched["data"]["table"]["total_rows"], 2);

        let sorted = payload(table::run_with_options(TableRunOptions {
            source: stdin_source(&home, sample_json()),
            sort: Some(SortKey::Amount),
            descending: true,
            page: 2,
            page_size: 3,
            ..TableRunOptions::default()
        }));
        let page = &sorted["data"]["table"];
        assert_eq!(page["page"], 2);
        assert_eq!(page["total_pages"], 2);
        assert_eq!(page["rows"].as_array().map(Vec::len), Some(1));
        assert!(approx(&page["rows"][0]["amount"], 123.45));
        assert_eq!(sorted["data"]["sort"]["direction"], "desc");

        let clamped = payload(table::run_with_options(TableRunOptions {
            source: stdin_source(&home, sample_json()),
            page: 40,
            ..TableRunOptions::default()
        }));
        assert_eq!(clamped["data"]["table"]["page"], 1);
    }
}

#[test]
fn table_rejects_direction_without_sort_key() {
    let home = temp_home("finboard-table-desc");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);
        let result = table::run_with_options(TableRunOptions {
            source: stdin_source(&home, sample_json()),
            descending: true,
            ..TableRunOptions::default()
        });
        assert!(result.is_err());
    }
}

#[test]
fn facets_ignore_stored_filters() {
    let home = temp_home("finboard-facets");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);
        let stored = filters::set(FiltersSetOptions {
            states: Some(vec!["HI".to_string()]),
            home_override: Some(&home),
            ..FiltersSetOptions::default()
        });
        assert!(stored.is_ok());

        let filtered = payload(metrics::run_with_options(stdin_source(&home, sample_json())));
        assert_eq!(filtered["data"]["metrics"]["total"], 0);

        let envelope = payload(facets::run_with_options(stdin_source(&home, sample_json())));
        let data = &envelope["data"]["facets"];
        assert_eq!(
            data["accounts"],
            serde_json::json!(["Acme Corp", "Beta Inc", "Gamma Ltd"])
        );
        assert_eq!(data["states"], serde_json::json!(["CA", "FL", "NY", "TX"]));
        assert_eq!(data["min_date"], "2022-01-10");
        assert_eq!(data["max_date"], "2023-11-30");
    }
}

#[test]
fn csv_file_source_reports_rejected_rows() {
    let home = temp_home("finboard-csv");
    assert!(home.is_ok());
    if let Ok((dir, home)) = home {
        login(&home);
        let csv = "date,amount,transaction_type,currency,account,industry,state\n\
                   1673740800000,30000,deposit,usd,Acme Corp,Technology,CA\n\
                   ,5000,withdraw,usd,Beta Inc,Hotels,NY\n";
        let path = write_source(dir.path(), "rows.csv", csv);
        let path_text = path.display().to_string();

        let envelope = payload(metrics::run_with_options(SourceOptions {
            path: Some(&path_text),
            home_override: Some(&home),
            stdin_override: Some(String::new()),
        }));
        let source = &envelope["data"]["source"];
        assert_eq!(source["source_kind"], "file");
        assert_eq!(source["rows_read"], 2);
        assert_eq!(source["transactions_loaded"], 1);
        assert_eq!(source["rejected_count"], 1);
        assert!(approx(&envelope["data"]["metrics"]["revenue"], 300.0));
    }
}

#[test]
fn malformed_source_fails_with_format_error() {
    let home = temp_home("finboard-bad-source");
    assert!(home.is_ok());
    if let Ok((_dir, home)) = home {
        login(&home);
        let result =
            metrics::run_with_options(stdin_source(&home, "{\"rows\": []}".to_string()));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_source_format");
        }
    }
}
