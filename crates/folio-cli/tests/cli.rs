//! End-to-end tests for the `folio` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// TEST FIXTURES
// =============================================================================

const AAPL_ROW: &str = "AAPL,Apple Inc.,10,200.00,2024-09-13,245.50,2455.00,455.00,22.75,1.1 years";

/// A `folio` command isolated from the user's preferences.
fn folio(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env("FOLIO_CONFIG", dir.path().join("config.json"))
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn aapl_lots_json(dir: &TempDir) -> String {
    write(
        dir,
        "lots.json",
        r#"[{"symbol": "aapl", "shares": 10, "purchase_price": "200.00", "purchase_date": "2024-09-13"}]"#,
    )
}

// =============================================================================
// UNIVERSE, SEARCH, SCREEN
// =============================================================================

#[test]
fn test_universe_lists_fifteen_symbols() {
    let dir = TempDir::new().unwrap();
    let output = folio(&dir)
        .args(["universe", "--format", "minimal"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let symbols: Vec<&str> = stdout.lines().collect();
    assert_eq!(symbols.len(), 15);
    assert_eq!(symbols[0], "AAPL");
}

#[test]
fn test_universe_by_sector() {
    let dir = TempDir::new().unwrap();
    folio(&dir)
        .args(["universe", "--sector", "healthcare", "-f", "minimal"])
        .assert()
        .success()
        .stdout("UNH\nJNJ\n");
}

#[test]
fn test_universe_rejects_unknown_sector() {
    let dir = TempDir::new().unwrap();
    folio(&dir)
        .args(["universe", "--sector", "crypto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown sector"));
}

#[test]
fn test_search() {
    let dir = TempDir::new().unwrap();
    folio(&dir)
        .args(["search", "corp", "-f", "minimal"])
        .assert()
        .success()
        .stdout("MSFT\nNVDA\n");
}

#[test]
fn test_search_table_shows_company() {
    let dir = TempDir::new().unwrap();
    folio(&dir)
        .args(["search", "visa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Visa Inc."));
}

#[test]
fn test_screen_filters_compose() {
    let dir = TempDir::new().unwrap();
    folio(&dir)
        .args(["screen", "--risk", "high", "-f", "minimal"])
        .assert()
        .success()
        .stdout("NVDA\nMETA\nTSLA\n");

    folio(&dir)
        .args(["screen", "--sector", "financial", "--risk", "low", "-f", "minimal"])
        .assert()
        .success()
        .stdout("BRK.B\nV\n");
}

// =============================================================================
// VALUE
// =============================================================================

#[test]
fn test_value_json_snapshot() {
    let dir = TempDir::new().unwrap();
    let lots = aapl_lots_json(&dir);

    let output = folio(&dir)
        .args(["value", "--lots", &lots, "--as-of", "2025-10-18", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["totals"]["lot_count"], 1);
    assert_eq!(snapshot["totals"]["total_value"], "2455.00");
    assert_eq!(snapshot["lots"][0]["holding_period"]["label"], "1.1 years");
    assert_eq!(snapshot["best_performer"]["symbol"], "AAPL");
}

#[test]
fn test_value_yaml_minimal() {
    let dir = TempDir::new().unwrap();
    let lots = write(
        &dir,
        "lots.yaml",
        "- symbol: AAPL\n  shares: 10\n  purchase_price: 200\n  purchase_date: 2024-09-13\n- symbol: JPM\n  shares: 2\n  purchase_price: 300\n  purchase_date: 2025-01-02\n",
    );

    // 10 * 245.50 + 2 * 314.78
    folio(&dir)
        .args(["value", "-l", &lots, "--as-of", "2025-10-18", "-f", "minimal"])
        .assert()
        .success()
        .stdout("3084.56\n");
}

#[test]
fn test_value_table_sections() {
    let dir = TempDir::new().unwrap();
    let lots = aapl_lots_json(&dir);

    folio(&dir)
        .args(["value", "--lots", &lots, "--as-of", "2025-10-18"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Holdings")
                .and(predicate::str::contains("Risk Metrics"))
                .and(predicate::str::contains("Sector Allocation"))
                .and(predicate::str::contains("+455.00")),
        );
}

#[test]
fn test_value_with_quote_file() {
    let dir = TempDir::new().unwrap();
    let lots = aapl_lots_json(&dir);
    let quotes = write(
        &dir,
        "quotes.json",
        r#"{"AAPL": {"current_price": "250", "beta": "1.2", "volatility": "25", "sector": "Technology"}}"#,
    );

    folio(&dir)
        .args(["value", "--lots", &lots, "--quotes", &quotes, "--as-of", "2025-10-18", "-f", "minimal"])
        .assert()
        .success()
        .stdout("2500.00\n");
}

#[test]
fn test_value_missing_quote_fails() {
    let dir = TempDir::new().unwrap();
    let lots = aapl_lots_json(&dir);
    let quotes = write(
        &dir,
        "quotes.yaml",
        "MSFT:\n  current_price: 500\n  beta: 1.1\n  volatility: 22\n  sector: Technology\n",
    );

    folio(&dir)
        .args(["value", "--lots", &lots, "--quotes", &quotes, "--as-of", "2025-10-18"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing quote for AAPL"));
}

#[test]
fn test_value_reports_bad_lot_position() {
    let dir = TempDir::new().unwrap();
    let lots = write(
        &dir,
        "lots.json",
        r#"[
            {"symbol": "AAPL", "shares": 10, "purchase_price": 200, "purchase_date": "2024-09-13"},
            {"symbol": "ZZZZ", "shares": 1, "purchase_price": 1, "purchase_date": "2024-09-13"}
        ]"#,
    );

    folio(&dir)
        .args(["value", "--lots", &lots, "--as-of", "2025-10-18"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lot 2 (ZZZZ)").and(predicate::str::contains("Unknown symbol")));
}

#[test]
fn test_value_reports_overflow_instead_of_crashing() {
    let dir = TempDir::new().unwrap();
    let lots = write(
        &dir,
        "lots.json",
        r#"[{"symbol": "AAPL", "shares": 1, "purchase_price": "0.0000000000000000000000000001", "purchase_date": "2024-09-13"}]"#,
    );

    folio(&dir)
        .args(["value", "--lots", &lots, "--as-of", "2025-10-18"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Arithmetic overflow computing gain/loss percent of AAPL"));

    let huge = write(
        &dir,
        "huge.json",
        r#"[{"symbol": "AAPL", "shares": 9223372036854775807, "purchase_price": "1000000000000", "purchase_date": "2024-09-13"}]"#,
    );
    folio(&dir)
        .args(["export", "--lots", &huge, "--as-of", "2025-10-18"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Lot 1 (AAPL)"));
}

#[test]
fn test_value_rejects_unsupported_file() {
    let dir = TempDir::new().unwrap();
    let lots = write(&dir, "lots.txt", "AAPL 10 200 2024-09-13");

    folio(&dir)
        .args(["value", "--lots", &lots])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}

// =============================================================================
// EXPORT
// =============================================================================

#[test]
fn test_export_to_stdout() {
    let dir = TempDir::new().unwrap();
    let lots = aapl_lots_json(&dir);

    let expected = format!(
        "Symbol,Company,Shares,PurchasePrice,PurchaseDate,CurrentPrice,MarketValue,GainLoss,GainLossPercent,HoldingPeriod\n{AAPL_ROW}\n"
    );
    folio(&dir)
        .args(["export", "--lots", &lots, "--as-of", "2025-10-18"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_export_to_directory_uses_default_name() {
    let dir = TempDir::new().unwrap();
    let lots = aapl_lots_json(&dir);
    let out_dir = dir.path().join("exports");
    fs::create_dir(&out_dir).unwrap();

    folio(&dir)
        .args(["export", "--lots", &lots, "--as-of", "2025-10-18", "--output"])
        .arg(&out_dir)
        .assert()
        .success();

    let written = fs::read_to_string(out_dir.join("portfolio_2025-10-18.csv")).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert_eq!(written.lines().nth(1), Some(AAPL_ROW));
}

// =============================================================================
// SESSION
// =============================================================================

#[test]
fn test_session_script() {
    let dir = TempDir::new().unwrap();
    let script = "\
add AAPL 10 200 2024-09-13
add JPM 5 250 2025-03-01
tick AAPL 255.50
remove 2
remove 2
export
quit
";

    folio(&dir)
        .args(["session", "--as-of", "2025-10-18"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Added lot #1: 10 AAPL @ 200.00 on 2024-09-13")
                .and(predicate::str::contains("AAPL 245.50 -> 255.50 (+10.00, +4.07%)"))
                .and(predicate::str::contains("Removed lot #2: 5 JPM"))
                .and(predicate::str::contains("error: Lot not found: 2"))
                .and(predicate::str::contains(
                    "AAPL,Apple Inc.,10,200.00,2024-09-13,255.50,2555.00,555.00,27.75,1.1 years",
                )),
        )
        .stderr(predicate::str::contains("session command failed"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_set_get_and_apply() {
    let dir = TempDir::new().unwrap();
    let lots = aapl_lots_json(&dir);

    folio(&dir)
        .args(["config", "set", "precision", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set decimal_precision = 4"));

    folio(&dir)
        .args(["config", "get", "decimal_precision", "-f", "minimal"])
        .assert()
        .success()
        .stdout("4\n");

    folio(&dir)
        .args(["value", "--lots", &lots, "--as-of", "2025-10-18", "-f", "minimal"])
        .assert()
        .success()
        .stdout("2455.0000\n");
}

#[test]
fn test_config_default_format_applies() {
    let dir = TempDir::new().unwrap();

    folio(&dir)
        .args(["config", "set", "default_format", "minimal"])
        .assert()
        .success();

    folio(&dir)
        .args(["search", "tesla"])
        .assert()
        .success()
        .stdout("TSLA\n");
}

#[test]
fn test_config_rejects_bad_value() {
    let dir = TempDir::new().unwrap();
    folio(&dir)
        .args(["config", "set", "default_format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));

    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn test_config_reset() {
    let dir = TempDir::new().unwrap();
    folio(&dir).args(["config", "set", "colors", "false"]).assert().success();
    folio(&dir)
        .args(["config", "reset", "--all"])
        .assert()
        .success();

    folio(&dir)
        .args(["config", "get", "use_colors", "-f", "minimal"])
        .assert()
        .success()
        .stdout("true\n");
}
