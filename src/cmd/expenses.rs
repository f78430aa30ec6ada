//! Expenses command - the parsed ledger, one row per expense

use super::read_table;
use crate::expenses::{parse_expenses, ExpenseRecord};
use crate::money::{format_fixed, format_usd, saturating_sum};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ExpensesCommand {
    /// Expense ledger export (csv, or - for stdin)
    #[arg(short, long)]
    expenses: PathBuf,

    /// Only show this category (case-insensitive)
    #[arg(short, long)]
    category: Option<String>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

/// Row for the expenses table output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ExpenseRow {
    #[tabled(rename = "Date")]
    pub date: String,

    #[tabled(rename = "Category")]
    pub category: String,

    #[tabled(rename = "Vendor")]
    pub vendor: String,

    #[tabled(rename = "Amount")]
    pub amount: String,
}

impl From<&ExpenseRecord> for ExpenseRow {
    fn from(record: &ExpenseRecord) -> Self {
        ExpenseRow {
            date: record.date.format("%Y-%m-%d").to_string(),
            category: record.category.clone(),
            vendor: record.vendor.trim().to_string(),
            amount: format_fixed(record.amount),
        }
    }
}

impl ExpensesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let ledger = parse_expenses(&read_table(&self.expenses)?);

        let records: Vec<&ExpenseRecord> = ledger
            .iter()
            .filter(|r| {
                self.category
                    .as_ref()
                    .is_none_or(|c| r.category.eq_ignore_ascii_case(c))
            })
            .collect();
        let total = saturating_sum(records.iter().map(|r| r.amount));
        let rows: Vec<ExpenseRow> = records.into_iter().map(ExpenseRow::from).collect();

        if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(&rows, total);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[ExpenseRow], total: Decimal) {
        if rows.is_empty() {
            println!("No expenses found");
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!("{} expenses, total {}", rows.len(), format_usd(total));
    }

    fn write_csv(&self, rows: &[ExpenseRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
