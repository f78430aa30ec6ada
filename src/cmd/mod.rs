pub mod breakdown;
pub mod expenses;
pub mod report;
pub mod tax;
pub mod validate;

use crate::expenses::{parse_expenses, ExpenseLedger};
use crate::sales::{parse_sales_summary, SalesSummary};
use crate::table::RawTable;
use crate::tax::hanover::{DEFAULT_FED_INCOME_RATE, DEFAULT_LOCAL_EIT_RATE};
use crate::tax::TaxRates;
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// The two exports every statement is built from
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Sales summary export (csv, or - for stdin)
    #[arg(short, long)]
    pub sales: PathBuf,

    /// Expense ledger export (csv, or - for stdin)
    #[arg(short, long)]
    pub expenses: PathBuf,
}

impl InputArgs {
    pub fn load(&self) -> anyhow::Result<(SalesSummary, ExpenseLedger)> {
        let (sales, expenses) = self.read_tables()?;
        Ok((parse_sales_summary(&sales), parse_expenses(&expenses)))
    }

    pub fn read_tables(&self) -> anyhow::Result<(RawTable, RawTable)> {
        if is_stdin(&self.sales) && is_stdin(&self.expenses) {
            anyhow::bail!("Only one of --sales and --expenses can be read from stdin");
        }
        let sales = read_table(&self.sales).context("Could not load the sales file")?;
        let expenses = read_table(&self.expenses).context("Could not load the expenses file")?;
        Ok((sales, expenses))
    }
}

/// Tax rate inputs, as percentages
#[derive(Args, Debug, Clone, Copy)]
pub struct RateArgs {
    /// Federal income tax estimate (%), 0 to 60
    #[arg(long, default_value_t = DEFAULT_FED_INCOME_RATE)]
    pub fed_rate: Decimal,

    /// Hanover local EIT (%), 0 to 10
    #[arg(long, default_value_t = DEFAULT_LOCAL_EIT_RATE)]
    pub local_rate: Decimal,
}

impl RateArgs {
    pub fn rates(&self) -> anyhow::Result<TaxRates> {
        Ok(TaxRates::new(self.fed_rate, self.local_rate)?)
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a raw table from a csv file (or stdin with "-")
pub fn read_table(path: &Path) -> anyhow::Result<RawTable> {
    if is_stdin(path) {
        read_from_stdin()
    } else {
        RawTable::open(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn read_from_stdin() -> anyhow::Result<RawTable> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    Ok(RawTable::read_csv(io::Cursor::new(buffer))?)
}
