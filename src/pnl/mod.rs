//! Profit & Loss statement built from the sales summary and expense ledger.

pub mod render;

use crate::expenses::ExpenseLedger;
use crate::money::{ratio, saturating_add, saturating_sub, saturating_sum};
use crate::sales::SalesSummary;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

/// Categories counted as cost of goods sold, in display order. Everything else is OPEX.
pub const COGS_CATEGORIES: [&str; 2] = ["Back Bar", "Inventory"];

/// One row of the statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PnlLineItem {
    pub label: String,
    pub amount: Option<Decimal>,
    pub percent_of_revenue: Option<Decimal>,
}

impl PnlLineItem {
    pub fn header(label: &str) -> Self {
        PnlLineItem {
            label: label.to_string(),
            amount: None,
            percent_of_revenue: None,
        }
    }

    pub fn separator() -> Self {
        PnlLineItem::header("")
    }

    pub fn amount(label: impl Into<String>, amount: Decimal, percent: Decimal) -> Self {
        PnlLineItem {
            label: label.into(),
            amount: Some(amount),
            percent_of_revenue: Some(percent),
        }
    }

    pub fn is_separator(&self) -> bool {
        self.label.is_empty()
    }

    pub fn is_header(&self) -> bool {
        !self.label.is_empty() && self.amount.is_none() && self.percent_of_revenue.is_none()
    }
}

/// Statement rows in display order
pub type PnlTable = Vec<PnlLineItem>;

/// A computed statement: the rows plus the totals they were derived from.
#[derive(Debug, Clone, Serialize)]
pub struct PnlStatement {
    pub lines: PnlTable,
    pub include_tips: bool,
    pub total_revenue: Decimal,
    pub total_cogs: Decimal,
    pub gross_margin: Decimal,
    pub sales_tax_expense: Decimal,
    pub processing_fees: Decimal,
    pub total_opex: Decimal,
    pub net_profit: Decimal,
    /// COGS categories with a positive total, in [`COGS_CATEGORIES`] order
    pub cogs_categories: Vec<(String, Decimal)>,
    /// Operating expense categories, highest spend first
    pub opex_categories: Vec<(String, Decimal)>,
}

impl PnlStatement {
    /// Fixed-width boxed report
    pub fn render(&self) -> String {
        render::PnlReport::new(&self.lines).to_string()
    }

    /// Write the `(Description, Amount, % of Total)` rows as csv. Amounts are rounded to cents
    /// and percentages to a four place ratio, both half away from zero.
    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for line in &self.lines {
            wtr.serialize(ExportRow::from(line))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount ($)")]
    amount: Option<Decimal>,
    #[serde(rename = "% of Total")]
    percent_of_total: Option<Decimal>,
}

impl<'a> From<&'a PnlLineItem> for ExportRow<'a> {
    fn from(line: &'a PnlLineItem) -> Self {
        ExportRow {
            description: &line.label,
            amount: line.amount.map(|a| round_half_away(a, 2)),
            percent_of_total: line.percent_of_revenue.map(|p| round_half_away(p, 4)),
        }
    }
}

fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

struct LineBuilder {
    total_revenue: Decimal,
    lines: PnlTable,
}

impl LineBuilder {
    fn header(&mut self, label: &str) {
        self.lines.push(PnlLineItem::header(label));
    }

    fn separator(&mut self) {
        self.lines.push(PnlLineItem::separator());
    }

    fn line(&mut self, label: impl Into<String>, amount: Decimal) {
        let percent = ratio(amount, self.total_revenue);
        self.lines.push(PnlLineItem::amount(label, amount, percent));
    }

    fn detail(&mut self, label: &str, amount: Decimal) {
        self.line(format!("  {}", label), amount);
    }
}

/// Build the statement.
///
/// Collected sales tax is counted twice on purpose: once as revenue and again as the
/// `Sales Tax Paid Out` operating expense when it is remitted. Totals clamp to the decimal
/// range rather than overflow.
pub fn build_pnl(
    sales: &SalesSummary,
    ledger: &ExpenseLedger,
    include_tips: bool,
) -> PnlStatement {
    let net_sales = sales.net_sales();
    let gratuity = sales.gratuity();
    let tax_collected = sales.tax_collected();
    let prepayments = sales.prepayments();

    let mut total_revenue = saturating_sum([net_sales, tax_collected, prepayments]);
    if include_tips {
        total_revenue = saturating_add(total_revenue, gratuity);
    }

    let (cogs, opex): (Vec<_>, Vec<_>) = ledger
        .totals_by_category()
        .into_iter()
        .partition(|(category, _)| COGS_CATEGORIES.contains(&category.as_str()));

    let processing_fees = sales.processing_fees();
    let sales_tax_expense = tax_collected;

    let total_cogs = saturating_sum(cogs.iter().map(|(_, amount)| *amount));
    let gross_margin = saturating_sub(total_revenue, total_cogs);
    let opex_spend = saturating_sum(opex.iter().map(|(_, amount)| *amount));
    let total_opex = saturating_sum([opex_spend, processing_fees, sales_tax_expense]);
    let net_profit = saturating_sub(gross_margin, total_opex);

    let cogs_categories: Vec<(String, Decimal)> = COGS_CATEGORIES
        .iter()
        .map(|category| (category.to_string(), ledger.category_total(category)))
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .collect();

    // categories arrive in name order, so the stable sort leaves ties alphabetical
    let mut opex_categories = opex;
    opex_categories.sort_by(|a, b| b.1.cmp(&a.1));

    log::debug!(
        "P&L revenue={} cogs={} gross={} opex={} net={}",
        total_revenue,
        total_cogs,
        gross_margin,
        total_opex,
        net_profit
    );

    let mut b = LineBuilder {
        total_revenue,
        lines: Vec::new(),
    };

    b.header("REVENUE");
    b.detail("Net Sales", net_sales);
    b.detail("Tax Collected", tax_collected);
    b.detail("Prepayments", prepayments);
    if include_tips {
        b.detail("Tips/Gratuity", gratuity);
    }
    b.lines
        .push(PnlLineItem::amount("TOTAL REVENUE", total_revenue, Decimal::ONE));
    b.separator();

    b.header("COGS");
    for (category, amount) in &cogs_categories {
        b.detail(category, *amount);
    }
    b.line("TOTAL COGS", total_cogs);
    b.line("GROSS MARGIN", gross_margin);
    b.separator();

    b.header("OPERATING EXPENSES");
    b.detail("Sales Tax Paid Out", sales_tax_expense);
    b.detail("Processing Fees", processing_fees);
    for (category, amount) in &opex_categories {
        b.detail(category, *amount);
    }
    b.line("TOTAL OPEX", total_opex);
    b.line("NET PROFIT", net_profit);

    PnlStatement {
        lines: b.lines,
        include_tips,
        total_revenue,
        total_cogs,
        gross_margin,
        sales_tax_expense,
        processing_fees,
        total_opex,
        net_profit,
        cogs_categories,
        opex_categories,
    }
}

/// Rendered report, statement rows and net profit in one call
pub fn build_report(
    sales: &SalesSummary,
    ledger: &ExpenseLedger,
    include_tips: bool,
) -> (String, PnlTable, Decimal) {
    let statement = build_pnl(sales, ledger, include_tips);
    let text = statement.render();
    (text, statement.lines, statement.net_profit)
}
