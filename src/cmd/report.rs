//! Report command - P&L statement followed by the tax estimate on its net profit

use super::tax::TaxData;
use super::{InputArgs, RateArgs};
use crate::money::format_fixed;
use crate::pnl::{build_pnl, PnlStatement};
use crate::tax::{estimate_tax, TaxBreakdown};
use anyhow::Context;
use clap::Args;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReportCommand {
    #[command(flatten)]
    inputs: InputArgs,

    #[command(flatten)]
    rates: RateArgs,

    /// Leave tips/gratuity out of revenue
    #[arg(long)]
    exclude_tips: bool,

    /// Output the statement rows as CSV instead of formatted text
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Also write the statement rows to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Also save the tax report text to this file
    #[arg(long)]
    tax_output: Option<PathBuf>,
}

/// Report data for JSON output
#[derive(Debug, Serialize)]
struct ReportData {
    include_tips: bool,
    total_revenue: String,
    total_cogs: String,
    gross_margin: String,
    total_opex: String,
    net_profit: String,
    lines: Vec<LineData>,
    tax: TaxData,
}

#[derive(Debug, Serialize)]
struct LineData {
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    percent_of_revenue: Option<String>,
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rates = self.rates.rates()?;
        let (sales, ledger) = self.inputs.load()?;

        let statement = build_pnl(&sales, &ledger, !self.exclude_tips);
        let tax = estimate_tax(statement.net_profit, rates);
        log::info!(
            "Net profit {}, estimated tax {}",
            format_fixed(statement.net_profit),
            format_fixed(tax.total_tax)
        );

        if let Some(path) = &self.export {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            statement.write_csv(BufWriter::new(file))?;
            log::info!("Wrote statement rows to {}", path.display());
        }
        if let Some(path) = &self.tax_output {
            fs::write(path, tax.to_string())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote tax report to {}", path.display());
        }

        if self.csv {
            statement.write_csv(io::stdout())
        } else if self.json {
            print_json(&statement, &tax)
        } else {
            print!("{}", statement.render());
            println!();
            print!("{}", tax);
            Ok(())
        }
    }
}

fn print_json(statement: &PnlStatement, tax: &TaxBreakdown) -> anyhow::Result<()> {
    let percent = |p: Decimal| {
        format!(
            "{:.4}",
            p.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
        )
    };

    let data = ReportData {
        include_tips: statement.include_tips,
        total_revenue: format_fixed(statement.total_revenue),
        total_cogs: format_fixed(statement.total_cogs),
        gross_margin: format_fixed(statement.gross_margin),
        total_opex: format_fixed(statement.total_opex),
        net_profit: format_fixed(statement.net_profit),
        lines: statement
            .lines
            .iter()
            .map(|line| LineData {
                description: line.label.clone(),
                amount: line.amount.map(format_fixed),
                percent_of_revenue: line.percent_of_revenue.map(percent),
            })
            .collect(),
        tax: TaxData::from(tax),
    };

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
