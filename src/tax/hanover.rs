//! Fixed U.S. federal and Hanover, Pennsylvania figures used by the estimator.
//!
//! These are policy constants for a single jurisdiction and year, not derived values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Share of net profit subject to self-employment tax
pub const SE_EARNINGS_FACTOR: Decimal = dec!(0.9235);
/// Social security + medicare (15.3%)
pub const SE_TAX_RATE: Decimal = dec!(0.153);
/// Half of SE tax is deductible from income before federal income tax
pub const SE_DEDUCTIBLE_SHARE: Decimal = dec!(0.5);
/// Pennsylvania flat personal income tax (3.07%)
pub const PA_STATE_RATE: Decimal = dec!(0.0307);
/// Local Services Tax, charged once profit exceeds [`LST_THRESHOLD`]
pub const LST_AMOUNT: Decimal = dec!(52);
pub const LST_THRESHOLD: Decimal = dec!(12000);

pub const DEFAULT_FED_INCOME_RATE: Decimal = dec!(12);
pub const DEFAULT_LOCAL_EIT_RATE: Decimal = dec!(1);
pub const MAX_FED_INCOME_RATE: Decimal = dec!(60);
pub const MAX_LOCAL_EIT_RATE: Decimal = dec!(10);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    #[error("{name} rate {value}% must be between 0% and {max}%")]
    OutOfRange {
        name: &'static str,
        value: Decimal,
        max: Decimal,
    },
}

/// User-chosen percentage rates (12 means 12%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxRates {
    pub fed_income_rate: Decimal,
    pub local_eit_rate: Decimal,
}

impl Default for TaxRates {
    fn default() -> Self {
        TaxRates {
            fed_income_rate: DEFAULT_FED_INCOME_RATE,
            local_eit_rate: DEFAULT_LOCAL_EIT_RATE,
        }
    }
}

impl TaxRates {
    /// Rates within the ranges the estimator accepts as user input
    pub fn new(fed_income_rate: Decimal, local_eit_rate: Decimal) -> Result<Self, RateError> {
        check_range("federal income", fed_income_rate, MAX_FED_INCOME_RATE)?;
        check_range("local EIT", local_eit_rate, MAX_LOCAL_EIT_RATE)?;
        Ok(TaxRates {
            fed_income_rate,
            local_eit_rate,
        })
    }
}

fn check_range(name: &'static str, value: Decimal, max: Decimal) -> Result<(), RateError> {
    if value < Decimal::ZERO || value > max {
        Err(RateError::OutOfRange { name, value, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rates() {
        let rates = TaxRates::default();
        assert_eq!(rates.fed_income_rate, dec!(12));
        assert_eq!(rates.local_eit_rate, dec!(1));
    }

    #[test]
    fn rates_within_limits() {
        assert!(TaxRates::new(dec!(0), dec!(0)).is_ok());
        assert!(TaxRates::new(dec!(60), dec!(10)).is_ok());
        assert!(TaxRates::new(dec!(22.5), dec!(1.7)).is_ok());
    }

    #[test]
    fn rates_outside_limits() {
        assert_eq!(
            TaxRates::new(dec!(61), dec!(1)),
            Err(RateError::OutOfRange {
                name: "federal income",
                value: dec!(61),
                max: dec!(60),
            })
        );
        assert!(TaxRates::new(dec!(12), dec!(-0.5)).is_err());
        assert!(TaxRates::new(dec!(12), dec!(10.1)).is_err());
    }

    #[test]
    fn rate_error_message() {
        let err = TaxRates::new(dec!(12), dec!(11)).unwrap_err();
        assert_eq!(err.to_string(), "local EIT rate 11% must be between 0% and 10%");
    }
}
