//! Profit & Loss statements and self-employment tax estimates from a small business's sales
//! summary and expense ledger exports.

pub mod cmd;
pub mod expenses;
pub mod money;
pub mod pnl;
pub mod sales;
pub mod table;
pub mod tax;

pub use expenses::{parse_expenses, ExpenseLedger, ExpenseRecord};
pub use pnl::{build_pnl, build_report, PnlLineItem, PnlStatement, PnlTable};
pub use sales::{parse_sales_summary, SalesSummary};
pub use table::{Cell, RawTable, TableError};
pub use tax::{estimate_tax, tax_report, TaxBreakdown, TaxRates};
