use super::hanover::{
    TaxRates, LST_AMOUNT, LST_THRESHOLD, PA_STATE_RATE, SE_DEDUCTIBLE_SHARE, SE_EARNINGS_FACTOR,
    SE_TAX_RATE,
};
use crate::money::{format_rate, format_usd};
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Estimated liability for a year of business profit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxBreakdown {
    pub net_profit: Decimal,
    pub rates: TaxRates,
    pub self_employment_tax: Decimal,
    pub federal_income_tax: Decimal,
    pub state_tax: Decimal,
    pub local_tax: Decimal,
    pub local_services_tax: Decimal,
    pub total_tax: Decimal,
    pub take_home: Decimal,
    pub generated_at: NaiveDateTime,
}

/// Estimate taxes on `net_profit`, stamped with the current local time.
pub fn estimate_tax(net_profit: Decimal, rates: TaxRates) -> TaxBreakdown {
    estimate_tax_at(net_profit, rates, Local::now().naive_local())
}

/// Estimate taxes on `net_profit`.
///
/// Only federal income tax is floored at zero; a loss produces negative self-employment, state
/// and local components.
pub fn estimate_tax_at(
    net_profit: Decimal,
    rates: TaxRates,
    generated_at: NaiveDateTime,
) -> TaxBreakdown {
    let self_employment_tax = net_profit * SE_EARNINGS_FACTOR * SE_TAX_RATE;
    let taxable_income =
        (net_profit - self_employment_tax * SE_DEDUCTIBLE_SHARE).max(Decimal::ZERO);
    let federal_income_tax = taxable_income * (rates.fed_income_rate / Decimal::ONE_HUNDRED);
    let state_tax = net_profit * PA_STATE_RATE;
    let local_tax = net_profit * (rates.local_eit_rate / Decimal::ONE_HUNDRED);
    let local_services_tax = if net_profit > LST_THRESHOLD {
        LST_AMOUNT
    } else {
        Decimal::ZERO
    };

    let total_tax =
        self_employment_tax + federal_income_tax + state_tax + local_tax + local_services_tax;

    log::debug!(
        "Tax on {}: se={} fed={} state={} local={} lst={} total={}",
        net_profit,
        self_employment_tax,
        federal_income_tax,
        state_tax,
        local_tax,
        local_services_tax,
        total_tax
    );

    TaxBreakdown {
        net_profit,
        rates,
        self_employment_tax,
        federal_income_tax,
        state_tax,
        local_tax,
        local_services_tax,
        total_tax,
        take_home: net_profit - total_tax,
        generated_at,
    }
}

/// Rendered report and total tax
pub fn tax_report(net_profit: Decimal, rates: TaxRates) -> (String, Decimal) {
    let breakdown = estimate_tax(net_profit, rates);
    (breakdown.to_string(), breakdown.total_tax)
}

impl fmt::Display for TaxBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(50);
        let light = "-".repeat(50);

        writeln!(f, "ESTIMATED TAX LIABILITY (HANOVER, PA)")?;
        writeln!(f, "{}", heavy)?;
        writeln!(
            f,
            "Report Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "Business Profit:  {}", format_usd(self.net_profit))?;
        writeln!(f, "{}", light)?;
        writeln!(
            f,
            "Fed SE Tax (15.3%):               {}",
            format_usd(self.self_employment_tax)
        )?;
        writeln!(
            f,
            "Fed Income Tax ({}%):           {}",
            format_rate(self.rates.fed_income_rate),
            format_usd(self.federal_income_tax)
        )?;
        writeln!(
            f,
            "PA State Tax (3.07%):             {}",
            format_usd(self.state_tax)
        )?;
        writeln!(
            f,
            "Hanover Local EIT ({}%):          {}",
            format_rate(self.rates.local_eit_rate),
            format_usd(self.local_tax)
        )?;
        writeln!(
            f,
            "PA Local Services Tax (LST):      {}",
            format_usd(self.local_services_tax)
        )?;
        writeln!(f, "{}", heavy)?;
        writeln!(
            f,
            "TOTAL ESTIMATED TAX DUE:          {}",
            format_usd(self.total_tax)
        )?;
        writeln!(
            f,
            "ESTIMATED TAKE-HOME:              {}",
            format_usd(self.take_home)
        )
    }
}
