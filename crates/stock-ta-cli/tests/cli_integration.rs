//! Integration tests for the stock-ta CLI.
//!
//! These tests run the compiled binary end to end: CSV input through
//! indicator computation to JSON or CSV output, plus exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

/// Run the CLI with given arguments and return the output.
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stock-ta"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to execute CLI")
}

/// Run the CLI, assert success and parse stdout as JSON.
fn run_json(args: &[&str]) -> Value {
    let output = run_cli(args);
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn series<'a>(json: &'a Value, indicator: &str, key: &str) -> &'a Vec<Value> {
    json["indicators"][indicator][key]
        .as_array()
        .unwrap_or_else(|| panic!("missing series {indicator}/{key}"))
}

#[test]
fn test_analyze_input_all_indicators() {
    let aapl = fixture("aapl.csv");
    let json = run_json(&["analyze", "--input", &aapl]);

    assert_eq!(json["symbol"], "aapl");
    let dates = json["dates"].as_array().unwrap();
    assert_eq!(dates.len(), 90);
    assert_eq!(dates[0], "2024-01-02");
    assert_eq!(dates[89], "2024-05-06");
    assert!(json.get("failures").is_none());

    let indicators = json["indicators"].as_object().unwrap();
    let names: Vec<&str> = indicators.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["BBANDS", "MA", "MACD", "RSI", "STOCH"]);

    // every series is aligned with the dates
    for named in indicators.values() {
        for values in named.as_object().unwrap().values() {
            assert_eq!(values.as_array().unwrap().len(), 90);
        }
    }

    let ma5 = series(&json, "MA", "MA5");
    assert!(ma5[..4].iter().all(Value::is_null));
    assert!(ma5[4].is_number());
    let ma60 = series(&json, "MA", "MA60");
    assert!(ma60[58].is_null());
    assert!(ma60[59].is_number());

    let rsi = series(&json, "RSI", "RSI");
    assert!(rsi[12].is_null());
    for value in rsi[13..].iter().filter_map(Value::as_f64) {
        assert!((0.0..=100.0).contains(&value));
    }

    // MACD lines start at the first bar
    assert!(series(&json, "MACD", "MACD")[0].is_number());
    assert!(series(&json, "BBANDS", "BBANDS_middle")[19].is_number());
    assert!(series(&json, "STOCH", "STOCH_D")[17].is_number());
}

#[test]
fn test_analyze_data_dir_with_selected_indicators() {
    let dir = fixture("data");
    let json = run_json(&["analyze", "-d", &dir, "-s", "msft", "-I", "rsi,MA,RSI"]);

    assert_eq!(json["symbol"], "msft");
    let names: Vec<&String> = json["indicators"].as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["MA", "RSI"]);
}

#[test]
fn test_analyze_date_range_keeps_warm_up() {
    let aapl = fixture("aapl.csv");
    let json = run_json(&[
        "analyze", "-i", &aapl, "--start", "2024-03-01", "--end", "2024-03-29", "-I", "MA",
    ]);

    let dates = json["dates"].as_array().unwrap();
    assert_eq!(dates.len(), 21);
    assert_eq!(dates[0], "2024-03-01");
    assert_eq!(dates[20], "2024-03-29");

    // computed over the full history before restriction
    assert!(series(&json, "MA", "MA20")[0].is_number());
    let ma60 = series(&json, "MA", "MA60");
    assert!(ma60[15].is_null());
    assert!(ma60[16].is_number());
}

#[test]
fn test_analyze_weekly_interval() {
    let aapl = fixture("aapl.csv");
    let json = run_json(&["analyze", "-i", &aapl, "--interval", "1wk", "-I", "MA"]);
    let weeks = json["dates"].as_array().unwrap().len();
    assert!((18..=20).contains(&weeks), "unexpected week count {weeks}");
}

#[test]
fn test_analyze_csv_output_to_file() {
    let aapl = fixture("aapl.csv");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.csv");
    let out_str = out.display().to_string();

    let output = run_cli(&["analyze", "-i", &aapl, "-I", "RSI,MA", "-f", "csv", "-o", &out_str]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 91);
    assert_eq!(lines[0], "date,MA5,MA10,MA20,MA60,RSI");
    assert_eq!(lines[1], "2024-01-02,,,,,");
    assert!(lines[90].starts_with("2024-05-06,"));
    assert!(lines[90].split(',').skip(1).all(|cell| !cell.is_empty()));
}

#[test]
fn test_analyze_pretty_json() {
    let aapl = fixture("aapl.csv");
    let output = run_cli(&["analyze", "-i", &aapl, "-I", "RSI", "--pretty"]);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("{\n  \"symbol\": \"aapl\""));
}

#[test]
fn test_config_file_changes_parameters() {
    let aapl = fixture("aapl.csv");
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("engine.json");
    fs::write(&config, r#"{"rsi": {"period": 5}, "stochastic": {"k_period": 0}}"#).unwrap();
    let config_str = config.display().to_string();

    let json = run_json(&["analyze", "-i", &aapl, "-I", "RSI,STOCH", "-c", &config_str]);
    let rsi = series(&json, "RSI", "RSI");
    assert!(rsi[3].is_null());
    assert!(rsi[4].is_number());

    // a failing indicator is reported, not fatal
    assert!(json["indicators"].get("STOCH").is_none());
    assert!(json["failures"]["STOCH"].as_str().unwrap().contains("period"));
}

#[test]
fn test_config_reject_unknown_indicator() {
    let aapl = fixture("aapl.csv");
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("strict.json");
    fs::write(&config, r#"{"unknown_indicators": "reject"}"#).unwrap();
    let config_str = config.display().to_string();

    let output = run_cli(&["analyze", "-i", &aapl, "-I", "MA,ADX", "-c", &config_str]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ADX"));
}

#[test]
fn test_unknown_indicator_ignored_by_default() {
    let aapl = fixture("aapl.csv");
    let json = run_json(&["analyze", "-i", &aapl, "-I", "MA,ADX"]);
    assert_eq!(json["indicators"].as_object().unwrap().len(), 1);
}

#[test]
fn test_indicators_listing() {
    let output = run_cli(&["indicators"]);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("MACD    MACD, MACD_signal, MACD_hist"));
    assert!(text.contains("STOCH   STOCH_K, STOCH_D"));
}

#[test]
fn test_exit_code_not_found() {
    let dir = fixture("data");
    let output = run_cli(&["analyze", "-d", &dir, "-s", "NOPE"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("NOPE"));
}

#[test]
fn test_exit_code_malformed_csv() {
    let bad = fixture("malformed.csv");
    let output = run_cli(&["analyze", "-i", &bad]);
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
}

#[test]
fn test_exit_code_inconsistent_bar() {
    let bad = fixture("inconsistent.csv");
    let output = run_cli(&["analyze", "-i", &bad]);
    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_exit_code_inconsistent_bar_inside_weekly_bucket() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("ACME.csv"),
        "Date,Open,High,Low,Close,Volume\n\
         2024-03-04,10,11,9,10.5,100\n\
         2024-03-05,10,11,9,10.5,100\n\
         2024-03-06,10,8,12,10.5,100\n\
         2024-03-07,10,11,9,10.5,100\n",
    )
    .unwrap();
    let dir_str = dir.path().display().to_string();

    for interval in ["1d", "1wk", "1mo"] {
        let output = run_cli(&["analyze", "-d", &dir_str, "-s", "acme", "--interval", interval]);
        assert_eq!(output.status.code(), Some(4), "interval {interval}");
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("bar 2"));
    }
}

#[test]
fn test_exit_code_inverted_range() {
    let aapl = fixture("aapl.csv");
    let output = run_cli(&["analyze", "-i", &aapl, "--start", "2024-04-01", "--end", "2024-03-01"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_exit_code_missing_input_file() {
    let output = run_cli(&["analyze", "-i", "/nonexistent/prices.csv"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/prices.csv"));
}
