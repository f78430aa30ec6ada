//! Breakdown command - top vendors by spend and each category's share of expenses

use super::read_table;
use crate::expenses::parse_expenses;
use crate::money::{format_fixed, format_percent};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BreakdownCommand {
    /// Expense ledger export (csv, or - for stdin)
    #[arg(short, long)]
    expenses: PathBuf,

    /// Number of vendors to list
    #[arg(short, long, default_value_t = 5)]
    top: usize,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled, Serialize)]
struct VendorRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Spend")]
    amount: String,
}

#[derive(Debug, Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spend")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Debug, Serialize)]
struct BreakdownData {
    top_vendors: Vec<VendorRow>,
    categories: Vec<CategoryRow>,
}

impl BreakdownCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let ledger = parse_expenses(&read_table(&self.expenses)?);

        let data = BreakdownData {
            top_vendors: ledger
                .top_vendors(self.top)
                .into_iter()
                .enumerate()
                .map(|(i, (vendor, amount))| VendorRow {
                    rank: i + 1,
                    vendor: vendor.trim().to_string(),
                    amount: format_fixed(amount),
                })
                .collect(),
            categories: ledger
                .category_breakdown()
                .into_iter()
                .map(|c| CategoryRow {
                    category: c.category,
                    amount: format_fixed(c.amount),
                    share: format_percent(c.share),
                })
                .collect(),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&data)?);
        } else {
            print_tables(&data);
        }
        Ok(())
    }
}

fn print_tables(data: &BreakdownData) {
    if data.categories.is_empty() {
        println!("No expense data available");
        return;
    }

    println!("TOP {} VENDOR SPEND", data.top_vendors.len());
    let vendors = Table::new(&data.top_vendors)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", vendors);
    println!();

    println!("EXPENSE BREAKDOWN BY CATEGORY");
    let categories = Table::new(&data.categories)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", categories);
}
