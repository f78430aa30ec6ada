use super::PnlLineItem;
use crate::money::{format_amount, format_percent};
use std::fmt;

const TITLE: &str = "PROFIT & LOSS STATEMENT - All Year";
const TITLE_INDENT: usize = 20;

const DESCRIPTION_WIDTH: usize = 40;
const AMOUNT_WIDTH: usize = 15;
const PERCENT_WIDTH: usize = 10;

/// Boxed three column rendering of statement rows. Headers leave the amount and percent
/// columns blank; separators are drawn as a light rule.
///
/// Only rows without an amount render blank: a zero amount still prints as `0.00` and `0.0%`.
pub struct PnlReport<'a> {
    lines: &'a [PnlLineItem],
}

impl<'a> PnlReport<'a> {
    pub fn new(lines: &'a [PnlLineItem]) -> Self {
        PnlReport { lines }
    }
}

fn rule(f: &mut fmt::Formatter<'_>, fill: char, [left, mid, right]: [char; 3]) -> fmt::Result {
    let cell = |width: usize| fill.to_string().repeat(width + 2);
    writeln!(
        f,
        "{left}{}{mid}{}{mid}{}{right}",
        cell(DESCRIPTION_WIDTH),
        cell(AMOUNT_WIDTH),
        cell(PERCENT_WIDTH),
    )
}

fn row(f: &mut fmt::Formatter<'_>, description: &str, amount: &str, percent: &str) -> fmt::Result {
    writeln!(
        f,
        "║ {:<dw$} ║ {:>aw$} ║ {:>pw$} ║",
        description,
        amount,
        percent,
        dw = DESCRIPTION_WIDTH,
        aw = AMOUNT_WIDTH,
        pw = PERCENT_WIDTH,
    )
}

impl fmt::Display for PnlReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", " ".repeat(TITLE_INDENT), TITLE)?;
        rule(f, '═', ['╔', '╦', '╗'])?;
        row(f, "DESCRIPTION", "AMOUNT ($)", "% OF REV")?;
        rule(f, '═', ['╠', '╬', '╣'])?;

        for line in self.lines {
            if line.is_separator() {
                rule(f, '─', ['╠', '╬', '╣'])?;
            } else {
                let amount = line.amount.map(format_amount).unwrap_or_default();
                let percent = line
                    .percent_of_revenue
                    .map(format_percent)
                    .unwrap_or_default();
                row(f, &line.label, &amount, &percent)?;
            }
        }

        rule(f, '═', ['╚', '╩', '╝'])
    }
}
