//! E2E tests for the pnlc commands

use std::fs;
use std::process::{Command, Output};

const SALES: &str = "tests/data/sales.csv";
const EXPENSES: &str = "tests/data/expenses.csv";

fn pnlc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pnlc"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Test that the report prints the statement and the tax estimate
#[test]
fn report_text() {
    let output = pnlc(&["report", "-s", SALES, "-e", EXPENSES]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("PROFIT & LOSS STATEMENT - All Year"));
    assert!(stdout.contains("  Tips/Gratuity"));
    assert!(stdout.contains(&format!(
        "║ {:<40} ║ {:>15} ║ {:>10} ║",
        "NET PROFIT", "6,494.50", "58.5%"
    )));
    assert!(stdout.contains("ESTIMATED TAX LIABILITY (HANOVER, PA)"));
    assert!(stdout.contains("Business Profit:  $6,494.50"));
    assert!(stdout.contains("TOTAL ESTIMATED TAX DUE:          $1,906.25"));
}

/// Test leaving tips out of revenue
#[test]
fn report_exclude_tips() {
    let output = pnlc(&["report", "-s", SALES, "-e", EXPENSES, "--exclude-tips"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(!stdout.contains("Tips/Gratuity"));
    assert!(stdout.contains("Business Profit:  $5,994.50"));
}

/// Test CSV output of the statement rows
#[test]
fn report_csv() {
    let output = pnlc(&["report", "-s", SALES, "-e", EXPENSES, "--csv"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Description,Amount ($),% of Total");
    assert_eq!(lines[1], "REVENUE,,");
    assert!(lines.contains(&"  Rent,1800.00,0.1622"));
    assert!(lines.contains(&"TOTAL REVENUE,11100.00,1"));
    assert!(!stdout.contains("ESTIMATED TAX LIABILITY"));
}

/// Test JSON output
#[test]
fn report_json() {
    let output = pnlc(&["report", "-s", SALES, "-e", EXPENSES, "--json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["net_profit"], "6494.50");
    assert_eq!(json["total_revenue"], "11100.00");
    assert_eq!(json["tax"]["total_tax"], "1906.25");
    assert_eq!(json["tax"]["fed_income_rate_pct"], "12.0");
    assert_eq!(json["lines"][0]["description"], "REVENUE");
}

/// Test writing the export and tax report files
#[test]
fn report_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("pnl.csv");
    let tax = dir.path().join("tax.txt");

    let output = pnlc(&[
        "report",
        "-s",
        SALES,
        "-e",
        EXPENSES,
        "--export",
        export.to_str().unwrap(),
        "--tax-output",
        tax.to_str().unwrap(),
        "--fed-rate",
        "22",
        "--local-rate",
        "1.5",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let export = fs::read_to_string(export).unwrap();
    assert!(export.starts_with("Description,Amount ($),% of Total\n"));
    assert!(export.contains("NET PROFIT,6494.50,"));

    let tax = fs::read_to_string(tax).unwrap();
    assert!(tax.contains("Fed Income Tax (22.0%):"));
    assert!(tax.contains("Hanover Local EIT (1.5%):"));
}

/// Test the standalone tax estimate
#[test]
fn tax_for_net_profit() {
    let output = pnlc(&["tax", "--net-profit", "10350"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Fed SE Tax (15.3%):               $1,462.41"));
    assert!(stdout.contains("PA Local Services Tax (LST):      $0.00"));
}

/// Test the local services tax boundary
#[test]
fn tax_local_services_threshold() {
    let output = pnlc(&["tax", "--net-profit", "12000.01"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("PA Local Services Tax (LST):      $52.00"));
}

/// Test deriving net profit from the exports
#[test]
fn tax_from_exports() {
    let output = pnlc(&["tax", "-s", SALES, "-e", EXPENSES, "--json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["net_profit"], "6494.50");
    assert_eq!(json["take_home"], "4588.25");
}

/// Test a loss passes through
#[test]
fn tax_for_loss() {
    let output = pnlc(&["tax", "--net-profit", "-1000"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Fed Income Tax (12.0%):           $0.00"));
    assert!(stdout.contains("TOTAL ESTIMATED TAX DUE:          $-182.00"));
}

/// Test rates outside the accepted range are rejected
#[test]
fn tax_rejects_out_of_range_rate() {
    let output = pnlc(&["tax", "--net-profit", "1000", "--fed-rate", "75"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("federal income rate 75% must be between 0% and 60%"));
}

/// Test tax needs a source for net profit
#[test]
fn tax_requires_input() {
    let output = pnlc(&["tax"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Provide --net-profit, or both --sales and --expenses"));
}

/// Test listing expenses filtered by category
#[test]
fn expenses_by_category() {
    let output = pnlc(&["expenses", "-e", EXPENSES, "--category", "rent"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Landlord LLC"));
    assert!(!stdout.contains("Ads Inc"));
    assert!(stdout.contains("2 expenses, total $1,800.00"));
}

/// Test expenses CSV output
#[test]
fn expenses_csv() {
    let output = pnlc(&["expenses", "-e", EXPENSES, "--csv"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "date,category,vendor,amount");
    assert_eq!(lines[1], "2024-01-15,Back Bar,Lash Supply Co,1200.00");
    assert_eq!(lines.len(), 8);
}

/// Test the vendor and category breakdown
#[test]
fn breakdown_json() {
    let output = pnlc(&["breakdown", "-e", EXPENSES, "--top", "2", "--json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["top_vendors"].as_array().unwrap().len(), 2);
    assert_eq!(json["top_vendors"][0]["vendor"], "Landlord LLC");
    assert_eq!(json["top_vendors"][0]["amount"], "1800.00");
    assert_eq!(json["top_vendors"][1]["vendor"], "Lash Supply Co");
    assert_eq!(json["categories"][0]["category"], "Back Bar");
}

/// Test breakdown tables
#[test]
fn breakdown_tables() {
    let output = pnlc(&["breakdown", "-e", EXPENSES]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("TOP 5 VENDOR SPEND"));
    assert!(stdout.contains("EXPENSE BREAKDOWN BY CATEGORY"));
    assert!(stdout.contains("Wholesale Lashes"));
}

/// Test validation reports the dropped row and exits non-zero
#[test]
fn validate_reports_dropped_rows() {
    let output = pnlc(&["validate", "-s", SALES, "-e", EXPENSES]);
    let stdout = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Expense records: 7"));
    assert!(stdout.contains("expenses row 16: 'Landlord LLC' - date could not be parsed"));
}

/// Test a missing input file is reported
#[test]
fn missing_input_file() {
    let output = pnlc(&["report", "-s", "tests/data/nope.csv", "-e", EXPENSES]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Could not load the sales file"));
}

/// Test workbook inputs are rejected
#[test]
fn workbook_input_rejected() {
    let output = pnlc(&["report", "-s", "sales.xlsx", "-e", EXPENSES]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unsupported input format 'xlsx'"));
}
