pub mod estimate;
pub mod hanover;

pub use estimate::{estimate_tax, estimate_tax_at, tax_report, TaxBreakdown};
pub use hanover::{RateError, TaxRates};
