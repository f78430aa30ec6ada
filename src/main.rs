use clap::{Parser, Subcommand};
use pnlc::cmd;

#[derive(Parser, Debug)]
#[command(name = "pnlc", version, about = "Profit & Loss and self-employment tax estimator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the P&L statement and the tax estimate on its net profit
    Report(cmd::report::ReportCommand),
    /// Estimate tax for a net profit
    Tax(cmd::tax::TaxCommand),
    /// List parsed expense records
    Expenses(cmd::expenses::ExpensesCommand),
    /// Top vendors and category breakdown of expenses
    Breakdown(cmd::breakdown::BreakdownCommand),
    /// Report rows and labels that the statement ignores
    Validate(cmd::validate::ValidateCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report(report) => report.exec(),
        Command::Tax(tax) => tax.exec(),
        Command::Expenses(expenses) => expenses.exec(),
        Command::Breakdown(breakdown) => breakdown.exec(),
        Command::Validate(validate) => validate.exec(),
    }
}
