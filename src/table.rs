//! Positional, header-less tables as read from exported spreadsheets.

use crate::money::parse_decimal;
use rust_decimal::Decimal;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported input format '{0}': export the sheet as csv")]
    UnsupportedFormat(String),
    #[error("input contains no rows")]
    Empty,
}

/// A single untyped cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(Decimal),
}

impl Cell {
    /// Classify a raw csv field. Text is kept verbatim, surrounding whitespace included.
    pub fn from_field(field: &str) -> Self {
        if field.trim().is_empty() {
            Cell::Empty
        } else if let Some(number) = parse_decimal(field) {
            Cell::Number(number)
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Numeric value of the cell, parsing text cells as plain decimals
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Cell::Empty => None,
            Cell::Text(text) => parse_decimal(text),
            Cell::Number(number) => Some(*number),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => f.write_str(text),
            Cell::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from_field(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Number(value)
    }
}

static EMPTY: Cell = Cell::Empty;

/// Ordered rows of ordered cells. Row 0 is data, never column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        RawTable { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read a header-less csv. Rows may have differing lengths.
    pub fn read_csv<R: Read>(reader: R) -> Result<RawTable, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::from_field).collect());
        }

        if rows.is_empty() {
            return Err(TableError::Empty);
        }
        log::info!("Read {} csv rows", rows.len());
        Ok(RawTable { rows })
    }

    /// Open a table file, rejecting spreadsheet formats that need a workbook decoder.
    pub fn open(path: &Path) -> Result<RawTable, TableError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if let Some(ext @ ("xls" | "xlsx" | "xlsm" | "ods")) = extension.as_deref() {
            return Err(TableError::UnsupportedFormat(ext.to_string()));
        }
        let file = File::open(path)?;
        RawTable::read_csv(BufReader::new(file))
    }
}

/// Cell at `index`, or an empty cell when the row is too short
pub fn cell(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&EMPTY)
}

#[cfg(test)]
pub(crate) fn table(rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        rows.iter()
            .map(|row| row.iter().map(|&field| Cell::from(field)).collect())
            .collect(),
    )
}
