//! CSV adapter for [`TableSource`](super::TableSource).
//!
//! Reads the whole file into memory up front — label datasets are small,
//! and random row access is what the composer wants.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use super::{MemoryTable, TableSource};
use crate::EtiquetaError;

/// A CSV file exposed as a [`TableSource`].
#[derive(Debug, Clone)]
pub struct CsvTable {
    table: MemoryTable,
}

impl CsvTable {
    /// Read a CSV file from disk. The first record is the header row.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EtiquetaError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        Self::from_reader(file).map_err(|e| match e {
            EtiquetaError::Table(msg) => {
                EtiquetaError::Table(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Read CSV data from any reader. The first record is the header row.
    pub fn from_reader(reader: impl Read) -> Result<Self, EtiquetaError> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()
            .map_err(|e| EtiquetaError::Table(format!("bad header row: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record =
                record.map_err(|e| EtiquetaError::Table(format!("bad record {}: {e}", i + 1)))?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        Ok(Self {
            table: MemoryTable::new(columns, rows),
        })
    }
}

impl TableSource for CsvTable {
    fn column_names(&self) -> &[String] {
        self.table.column_names()
    }

    fn row_count(&self) -> usize {
        self.table.row_count()
    }

    fn cell(&self, row: usize, column: &str) -> Option<&str> {
        self.table.cell(row, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_become_column_names() {
        let data = "ASSLY,PARTNO,DESCRIPTION\nEngine,P001,Block\n";
        let table = CsvTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            table.column_names(),
            &["ASSLY".to_string(), "PARTNO".into(), "DESCRIPTION".into()]
        );
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_cells_accessible_by_column_name() {
        let data = "A,B\n1,2\n3,4\n";
        let table = CsvTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "B"), Some("2"));
        assert_eq!(table.cell(1, "A"), Some("3"));
    }

    #[test]
    fn test_quoted_fields() {
        let data = "A,B\n\"hello, world\",2\n";
        let table = CsvTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "A"), Some("hello, world"));
    }

    #[test]
    fn test_ragged_rows_allowed() {
        let data = "A,B,C\n1,2\n";
        let table = CsvTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "A"), Some("1"));
        assert_eq!(table.cell(0, "C"), None);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CsvTable::from_path("/nonexistent/labels.csv").unwrap_err();
        assert!(matches!(err, EtiquetaError::Io(_)));
    }
}
