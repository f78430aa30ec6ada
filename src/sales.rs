//! Sales summary export: a loose two column sheet of labelled totals.

use crate::table::{cell, Cell, RawTable};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

pub const NET_SALES: &str = "Net Sales";
pub const GRATUITY: &str = "Gratuity";
pub const TAX_COLLECTED: &str = "Tax";
pub const PREPAYMENTS: &str = "Prepayments For Future Sales";
pub const PROCESSING_FEES: &str = "Payment Processing Fees Paid By Business";

/// Labels the P&L reads from the summary
pub const KNOWN_LABELS: [&str; 5] = [
    NET_SALES,
    GRATUITY,
    TAX_COLLECTED,
    PREPAYMENTS,
    PROCESSING_FEES,
];

/// Label to amount. Missing labels read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    totals: BTreeMap<String, Decimal>,
}

impl SalesSummary {
    pub fn get(&self, label: &str) -> Decimal {
        self.totals.get(label).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.totals.contains_key(label)
    }

    /// A repeated label replaces the earlier value.
    pub fn insert(&mut self, label: impl Into<String>, amount: Decimal) {
        let label = label.into();
        if let Some(previous) = self.totals.insert(label.clone(), amount) {
            log::debug!(
                "Sales label '{}' repeated, {} replaced by {}",
                label,
                previous,
                amount
            );
        }
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn net_sales(&self) -> Decimal {
        self.get(NET_SALES)
    }

    pub fn gratuity(&self) -> Decimal {
        self.get(GRATUITY)
    }

    pub fn tax_collected(&self) -> Decimal {
        self.get(TAX_COLLECTED)
    }

    pub fn prepayments(&self) -> Decimal {
        self.get(PREPAYMENTS)
    }

    /// Fees are exported as a negative figure; the P&L uses the magnitude.
    pub fn processing_fees(&self) -> Decimal {
        self.get(PROCESSING_FEES).abs()
    }

    /// Recognised labels absent from this summary
    pub fn missing_labels(&self) -> Vec<&'static str> {
        KNOWN_LABELS
            .iter()
            .copied()
            .filter(|label| !self.contains(label))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for SalesSummary {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut summary = SalesSummary::default();
        for (label, amount) in iter {
            summary.insert(label, amount);
        }
        summary
    }
}

/// Read `label, amount` pairs from the first two columns. Rows without a usable label or a
/// numeric amount are skipped.
pub fn parse_sales_summary(table: &RawTable) -> SalesSummary {
    let summary: SalesSummary = table
        .rows()
        .iter()
        .filter_map(|row| summary_entry(row))
        .collect();
    log::info!(
        "Parsed {} sales totals from {} rows",
        summary.len(),
        table.len()
    );
    summary
}

fn summary_entry(row: &[Cell]) -> Option<(String, Decimal)> {
    let label = cell(row, 0).to_string().trim().to_string();
    if label.is_empty() || label == "nan" {
        return None;
    }
    let amount = row.get(1)?.as_decimal()?;
    Some((label, amount))
}
