use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parse a plain decimal such as `1200.50`, `-3` or `1.2e3`. Currency symbols and thousands
/// separators are not accepted here; see [`parse_amount`].
///
/// Numbers beyond the decimal range clamp to [`Decimal::MAX`] or [`Decimal::MIN`].
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
        .or_else(|| parse_out_of_range(s))
}

fn parse_out_of_range(s: &str) -> Option<Decimal> {
    let value = s.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if let Some(decimal) = Decimal::from_f64(value) {
        return Some(decimal);
    }
    let clamped = if value.abs() < 1.0 {
        Decimal::ZERO
    } else if value < 0.0 {
        Decimal::MIN
    } else {
        Decimal::MAX
    };
    log::debug!("'{}' is outside the decimal range, using {}", s, clamped);
    Some(clamped)
}

fn bound(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// `a + b`, clamped to the decimal range on overflow
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        let clamped = bound(b.is_sign_negative());
        log::debug!("{} + {} overflows, clamped to {}", a, b, clamped);
        clamped
    })
}

/// `a - b`, clamped to the decimal range on overflow
pub fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| {
        let clamped = bound(!b.is_sign_negative());
        log::debug!("{} - {} overflows, clamped to {}", a, b, clamped);
        clamped
    })
}

pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, saturating_add)
}

/// `amount / total`. Zero when `total` is zero; clamped when the quotient overflows.
pub fn ratio(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    amount.checked_div(total).unwrap_or_else(|| {
        let clamped = bound(amount.is_sign_negative() != total.is_sign_negative());
        log::debug!("{} / {} overflows, clamped to {}", amount, total, clamped);
        clamped
    })
}

/// Parse a ledger amount that may carry a dollar sign and comma separators, e.g. `$1,200.00`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    parse_decimal(&s.replace([',', '$'], ""))
}

/// `1234.5` -> `1,234.50`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Two decimal places, no grouping: `1234.5` -> `1234.50`. Used for machine-readable output.
pub fn format_fixed(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// `-12.5` -> `$-12.50`. The sign follows the symbol, as the printed tax report always has.
pub fn format_usd(amount: Decimal) -> String {
    format!("${}", format_amount(amount))
}

/// Ratio to a one-decimal percentage: `0.9009` -> `90.1%`
pub fn format_percent(ratio: Decimal) -> String {
    let pct = ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or_else(|| bound(ratio.is_sign_negative()))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", pct)
}

/// A user-entered percentage rate, always showing at least one decimal: `12` -> `12.0`
pub fn format_rate(rate: Decimal) -> String {
    let rate = rate.normalize();
    if rate.scale() == 0 {
        format!("{}.0", rate)
    } else {
        rate.to_string()
    }
}
