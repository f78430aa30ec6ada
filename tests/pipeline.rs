//! Full pipeline over the fixture exports, through the library API

use pnlc::expenses::parse_expenses_detailed;
use pnlc::tax::estimate_tax_at;
use pnlc::{build_pnl, build_report, parse_expenses, parse_sales_summary, RawTable, TaxRates};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::Path;

fn load(name: &str) -> RawTable {
    RawTable::open(&Path::new("tests/data").join(name)).expect("fixture loads")
}

#[test]
fn fixture_statement_totals() {
    let sales = parse_sales_summary(&load("sales.csv"));
    let ledger = parse_expenses(&load("expenses.csv"));

    assert_eq!(sales.len(), 5);
    assert_eq!(ledger.len(), 7);

    let statement = build_pnl(&sales, &ledger, true);
    assert_eq!(statement.total_revenue, dec!(11100));
    assert_eq!(statement.total_cogs, dec!(1730));
    assert_eq!(statement.gross_margin, dec!(9370));
    assert_eq!(statement.total_opex, dec!(2875.50));
    assert_eq!(statement.net_profit, dec!(6494.50));
    assert_eq!(
        statement.opex_categories,
        vec![
            ("Rent".to_string(), dec!(1800)),
            ("Marketing".to_string(), dec!(325.50)),
        ]
    );
}

#[test]
fn fixture_drops_only_the_undated_row() {
    let parsed = parse_expenses_detailed(&load("expenses.csv"));
    let dropped: Vec<_> = parsed
        .skipped
        .iter()
        .filter(|s| s.reason.is_dropped_data())
        .collect();

    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].index, 15);
    assert_eq!(
        parsed.categories,
        vec!["Back Bar", "Inventory", "Rent", "Marketing"]
    );
}

#[test]
fn fixture_report_text() {
    let sales = parse_sales_summary(&load("sales.csv"));
    let ledger = parse_expenses(&load("expenses.csv"));
    let (text, table, net_profit) = build_report(&sales, &ledger, true);

    assert_eq!(net_profit, dec!(6494.50));
    // title, column headers and three frame rules
    assert_eq!(text.lines().count(), table.len() + 5);
    for expected in [
        format!("║ {:<40} ║ {:>15} ║ {:>10} ║", "  Back Bar", "1,280.00", "11.5%"),
        format!("║ {:<40} ║ {:>15} ║ {:>10} ║", "  Rent", "1,800.00", "16.2%"),
        format!("║ {:<40} ║ {:>15} ║ {:>10} ║", "NET PROFIT", "6,494.50", "58.5%"),
    ] {
        assert!(text.contains(&expected), "missing {expected}\n{text}");
    }
}

#[test]
fn fixture_tax_estimate() {
    let sales = parse_sales_summary(&load("sales.csv"));
    let ledger = parse_expenses(&load("expenses.csv"));
    let statement = build_pnl(&sales, &ledger, true);

    let at = chrono::NaiveDate::from_ymd_opt(2025, 4, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let tax = estimate_tax_at(statement.net_profit, TaxRates::default(), at);

    assert_eq!(tax.self_employment_tax, dec!(917.64362475));
    assert_eq!(tax.local_services_tax, Decimal::ZERO);
    assert_eq!(tax.total_tax, dec!(1906.251157265));
    assert_eq!(tax.take_home, dec!(4588.248842735));

    let text = tax.to_string();
    assert!(text.contains("TOTAL ESTIMATED TAX DUE:          $1,906.25"));
    assert!(text.contains("ESTIMATED TAKE-HOME:              $4,588.25"));
}
