//! # Tabular Sources
//!
//! The engine needs exactly three things from a table: its column names,
//! its row count, and cell access by (row, column name). File-format
//! decoding stays behind this boundary — [`MemoryTable`] backs tests and
//! API callers, [`CsvTable`] adapts delimited files for the CLI.

pub mod csv;

pub use self::csv::CsvTable;

use std::collections::HashMap;

/// Narrow contract over one dataset.
pub trait TableSource {
    /// Raw column names, in declared order.
    fn column_names(&self) -> &[String];

    /// Number of data rows.
    fn row_count(&self) -> usize;

    /// The cell at (`row`, `column`), if the column exists and the row has
    /// a value for it.
    fn cell(&self, row: usize, column: &str) -> Option<&str>;
}

/// An in-memory table of owned strings.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl MemoryTable {
    /// Build a table from column names and row values. Rows shorter than
    /// the column list read as missing cells.
    pub fn new<C, R, V>(columns: C, rows: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator<Item = V>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        Self {
            columns,
            index,
            rows,
        }
    }
}

impl TableSource for MemoryTable {
    fn column_names(&self) -> &[String] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = *self.index.get(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}
