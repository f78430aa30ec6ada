//! Tax command - recalculate the estimate for a given net profit

use super::{read_table, RateArgs};
use crate::expenses::parse_expenses;
use crate::money::{format_fixed, format_rate};
use crate::pnl::build_pnl;
use crate::sales::parse_sales_summary;
use crate::tax::{estimate_tax, TaxBreakdown};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TaxCommand {
    /// Business net profit to estimate tax on
    #[arg(short, long, allow_negative_numbers = true, conflicts_with_all = ["sales", "expenses"])]
    net_profit: Option<Decimal>,

    /// Sales summary export, to derive net profit from a statement
    #[arg(short, long, requires = "expenses")]
    sales: Option<PathBuf>,

    /// Expense ledger export, to derive net profit from a statement
    #[arg(short, long, requires = "sales")]
    expenses: Option<PathBuf>,

    /// Leave tips/gratuity out of revenue when deriving net profit
    #[arg(long)]
    exclude_tips: bool,

    #[command(flatten)]
    rates: RateArgs,

    /// Save the report text to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Tax breakdown for JSON output
#[derive(Debug, Serialize)]
pub struct TaxData {
    generated_at: String,
    net_profit: String,
    fed_income_rate_pct: String,
    local_eit_rate_pct: String,
    self_employment_tax: String,
    federal_income_tax: String,
    state_tax: String,
    local_tax: String,
    local_services_tax: String,
    total_tax: String,
    take_home: String,
}

impl From<&TaxBreakdown> for TaxData {
    fn from(tax: &TaxBreakdown) -> Self {
        TaxData {
            generated_at: tax.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            net_profit: format_fixed(tax.net_profit),
            fed_income_rate_pct: format_rate(tax.rates.fed_income_rate),
            local_eit_rate_pct: format_rate(tax.rates.local_eit_rate),
            self_employment_tax: format_fixed(tax.self_employment_tax),
            federal_income_tax: format_fixed(tax.federal_income_tax),
            state_tax: format_fixed(tax.state_tax),
            local_tax: format_fixed(tax.local_tax),
            local_services_tax: format_fixed(tax.local_services_tax),
            total_tax: format_fixed(tax.total_tax),
            take_home: format_fixed(tax.take_home),
        }
    }
}

impl TaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rates = self.rates.rates()?;
        let net_profit = self.net_profit()?;
        let tax = estimate_tax(net_profit, rates);

        if let Some(path) = &self.output {
            fs::write(path, tax.to_string())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote tax report to {}", path.display());
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&TaxData::from(&tax))?);
        } else {
            print!("{}", tax);
        }
        Ok(())
    }

    fn net_profit(&self) -> anyhow::Result<Decimal> {
        match (self.net_profit, &self.sales, &self.expenses) {
            (Some(net_profit), _, _) => Ok(net_profit),
            (None, Some(sales), Some(expenses)) => {
                let sales = parse_sales_summary(&read_table(sales)?);
                let ledger = parse_expenses(&read_table(expenses)?);
                Ok(build_pnl(&sales, &ledger, !self.exclude_tips).net_profit)
            }
            _ => anyhow::bail!("Provide --net-profit, or both --sales and --expenses"),
        }
    }
}
