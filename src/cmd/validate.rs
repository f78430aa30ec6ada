//! Validate command - surface rows and labels the statement silently ignores

use super::InputArgs;
use crate::expenses::parse_expenses_detailed;
use crate::sales::parse_sales_summary;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    inputs: InputArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output
#[derive(Debug, Serialize)]
struct ValidationIssue {
    source: &'static str,
    /// One-based row number in the export, if the issue is tied to a row
    #[serde(skip_serializing_if = "Option::is_none")]
    row: Option<usize>,
    text: String,
    message: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    sales_labels: usize,
    expense_records: usize,
    categories: Vec<String>,
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (sales_table, expenses_table) = self.inputs.read_tables()?;
        let sales = parse_sales_summary(&sales_table);
        let parsed = parse_expenses_detailed(&expenses_table);

        let mut issues: Vec<ValidationIssue> = sales
            .missing_labels()
            .into_iter()
            .map(|label| ValidationIssue {
                source: "sales",
                row: None,
                text: label.to_string(),
                message: "label not found, treated as 0".to_string(),
            })
            .collect();

        issues.extend(
            parsed
                .skipped
                .iter()
                .filter(|s| s.reason.is_dropped_data())
                .map(|s| ValidationIssue {
                    source: "expenses",
                    row: Some(s.index + 1),
                    text: s.label.trim().to_string(),
                    message: s.reason.to_string(),
                }),
        );

        let output = ValidationOutput {
            sales_labels: sales.len(),
            expense_records: parsed.ledger.len(),
            categories: parsed.categories,
            issue_count: issues.len(),
            issues,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_text(&output);
        }

        // Exit with code 1 if issues found
        if output.issue_count > 0 {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn print_text(output: &ValidationOutput) {
    println!(
        "Sales labels: {}  Expense records: {}  Categories: {}",
        output.sales_labels,
        output.expense_records,
        output.categories.join(", ")
    );

    if output.issues.is_empty() {
        println!("No issues found");
        return;
    }

    println!("{} issue(s):", output.issue_count);
    for issue in &output.issues {
        match issue.row {
            Some(row) => println!(
                "  {} row {}: '{}' - {}",
                issue.source, row, issue.text, issue.message
            ),
            None => println!("  {}: '{}' - {}", issue.source, issue.text, issue.message),
        }
    }
}
