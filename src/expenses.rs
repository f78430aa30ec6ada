//! Itemized expense ledger export.
//!
//! The export is a sequence of per-category tables. Each table starts with a row holding the
//! category name, immediately followed by a `Vendor` column header row, then one row per expense
//! (`vendor, memo, date, amount`). Title rows, subtotal rows and blank rows are interleaved.

use crate::money::{parse_amount, ratio, saturating_add, saturating_sum};
use crate::table::{cell, Cell, RawTable};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const VENDOR_HEADER: &str = "Vendor";

/// A single categorized expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseRecord {
    pub category: String,
    pub vendor: String,
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Why a ledger row produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// `Total` or `Total Expenses` subtotal row
    SummaryRow,
    /// Blank, title or column header row
    NotData,
    /// Data-like row before any category header
    NoCategory,
    /// Fewer than four columns
    MissingColumns,
    InvalidDate,
    InvalidAmount,
}

impl SkipReason {
    /// Rows that looked like expenses but were dropped
    pub fn is_dropped_data(&self) -> bool {
        matches!(
            self,
            SkipReason::NoCategory
                | SkipReason::MissingColumns
                | SkipReason::InvalidDate
                | SkipReason::InvalidAmount
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SkipReason::SummaryRow => "subtotal row",
            SkipReason::NotData => "not a data row",
            SkipReason::NoCategory => "no category header before this row",
            SkipReason::MissingColumns => "expected vendor, memo, date and amount columns",
            SkipReason::InvalidDate => "date could not be parsed",
            SkipReason::InvalidAmount => "amount could not be parsed",
        };
        f.write_str(msg)
    }
}

/// Result of interpreting one ledger row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Row names the category for the rows that follow
    Category(String),
    Record(ExpenseRecord),
    Skip(SkipReason),
}

/// A row that did not produce a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Zero-based position in the raw table
    pub index: usize,
    pub label: String,
    pub reason: SkipReason,
}

/// Categorized expenses in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseLedger {
    records: Vec<ExpenseRecord>,
}

/// One slice of the category breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Fraction of all ledger spend, zero for an empty ledger
    pub share: Decimal,
}

impl ExpenseLedger {
    pub fn new(records: Vec<ExpenseRecord>) -> Self {
        ExpenseLedger { records }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.records.iter().map(|r| r.amount))
    }

    pub fn category_total(&self, category: &str) -> Decimal {
        saturating_sum(
            self.records
                .iter()
                .filter(|r| r.category == category)
                .map(|r| r.amount),
        )
    }

    /// Summed amount per category, keyed in name order
    pub fn totals_by_category(&self) -> BTreeMap<String, Decimal> {
        group_totals(self.records.iter().map(|r| (&r.category, r.amount)))
    }

    pub fn totals_by_vendor(&self) -> BTreeMap<String, Decimal> {
        group_totals(self.records.iter().map(|r| (&r.vendor, r.amount)))
    }

    /// The `n` vendors with the highest spend, highest first. Equal spend is ordered by name.
    pub fn top_vendors(&self, n: usize) -> Vec<(String, Decimal)> {
        let mut vendors: Vec<_> = self.totals_by_vendor().into_iter().collect();
        vendors.sort_by(|a, b| b.1.cmp(&a.1));
        vendors.truncate(n);
        vendors
    }

    /// Every category with its share of total spend, in name order
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        let total = self.total();
        self.totals_by_category()
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                share: ratio(amount, total),
                category,
                amount,
            })
            .collect()
    }
}

fn group_totals<'a>(
    items: impl Iterator<Item = (&'a String, Decimal)>,
) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for (key, amount) in items {
        let total = totals.entry(key.clone()).or_insert(Decimal::ZERO);
        *total = saturating_add(*total, amount);
    }
    totals
}

/// Ledger plus the rows that were dropped on the way
#[derive(Debug, Clone, Default)]
pub struct ParsedLedger {
    pub ledger: ExpenseLedger,
    pub skipped: Vec<SkippedRow>,
    /// Category headers in the order they were found
    pub categories: Vec<String>,
}

#[derive(Debug, Default)]
struct LedgerFold {
    category: Option<String>,
    parsed: ParsedLedger,
}

impl LedgerFold {
    fn step(mut self, index: usize, row: &[Cell], next: Option<&[Cell]>) -> Self {
        match classify_row(row, next, self.category.as_deref()) {
            RowOutcome::Category(category) => {
                log::debug!("Row {}: category '{}'", index, category);
                self.parsed.categories.push(category.clone());
                self.category = Some(category);
            }
            RowOutcome::Record(record) => self.parsed.ledger.records.push(record),
            RowOutcome::Skip(reason) => {
                let label = cell(row, 0).to_string();
                if reason.is_dropped_data() {
                    log::debug!("Row {}: dropping '{}': {}", index, label.trim(), reason);
                }
                self.parsed.skipped.push(SkippedRow {
                    index,
                    label,
                    reason,
                });
            }
        }
        self
    }
}

/// Parse the ledger, keeping track of skipped rows.
pub fn parse_expenses_detailed(table: &RawTable) -> ParsedLedger {
    let fold = table
        .rows()
        .iter()
        .enumerate()
        .fold(LedgerFold::default(), |fold, (index, row)| {
            fold.step(index, row, table.row(index + 1))
        });

    log::info!(
        "Parsed {} expenses in {} categories from {} rows",
        fold.parsed.ledger.len(),
        fold.parsed.categories.len(),
        table.len()
    );
    fold.parsed
}

/// Parse the ledger. Rows that do not parse cleanly are dropped.
pub fn parse_expenses(table: &RawTable) -> ExpenseLedger {
    parse_expenses_detailed(table).ledger
}

/// Interpret a single row given the row after it and the category in effect.
pub fn classify_row(row: &[Cell], next: Option<&[Cell]>, category: Option<&str>) -> RowOutcome {
    let first = cell(row, 0).to_string();
    let label = first.trim();

    if label == "Total" || label.contains("Total Expenses") {
        return RowOutcome::Skip(SkipReason::SummaryRow);
    }
    if label.is_empty() || label == "nan" || label == VENDOR_HEADER || label.contains("Report") {
        return RowOutcome::Skip(SkipReason::NotData);
    }
    if next.is_some_and(is_vendor_header) {
        return RowOutcome::Category(label.to_string());
    }

    match category {
        Some(category) => match parse_record(category, row) {
            Ok(record) => RowOutcome::Record(record),
            Err(reason) => RowOutcome::Skip(reason),
        },
        None => RowOutcome::Skip(SkipReason::NoCategory),
    }
}

fn is_vendor_header(row: &[Cell]) -> bool {
    matches!(cell(row, 0), Cell::Text(text) if text == VENDOR_HEADER)
}

fn parse_record(category: &str, row: &[Cell]) -> Result<ExpenseRecord, SkipReason> {
    if row.len() < 4 {
        return Err(SkipReason::MissingColumns);
    }
    let date = parse_date(&row[2]).ok_or(SkipReason::InvalidDate)?;
    let amount = match &row[3] {
        Cell::Number(amount) => Some(*amount),
        Cell::Text(text) => parse_amount(text),
        Cell::Empty => None,
    }
    .ok_or(SkipReason::InvalidAmount)?;

    Ok(ExpenseRecord {
        category: category.to_string(),
        vendor: row[0].to_string(),
        date,
        amount,
    })
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    // two digit years first: `%Y` would happily read `24` as the year 24
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M %p",
];

/// Lenient date parsing. Any time of day is discarded.
pub fn parse_date(value: &Cell) -> Option<NaiveDate> {
    let text = match value {
        Cell::Empty => return None,
        Cell::Text(text) => text.trim().to_string(),
        Cell::Number(number) => number.to_string(),
    };

    if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        let year = text[..4].parse().ok()?;
        let month = text[4..6].parse().ok()?;
        let day = text[6..].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())
                .map(|dt| dt.date())
        })
}
