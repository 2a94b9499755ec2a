//! In-memory delimited tables.
//!
//! A [`Table`] is a header record plus its data rows in file order. Rows are
//! kept as raw [`StringRecord`]s so that values the sampler does not touch are
//! written back exactly as they were read.

pub mod csv;

pub use self::csv::{CsvConfig, CsvTableIo};

use crate::core::constants::{ITERATIONS_COLUMN, MANGLED_ITERATIONS_COLUMN};
use ::csv::StringRecord;

/// Header and ordered rows of one delimited file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Create a table from a header record and data rows
    pub fn new(headers: StringRecord, rows: Vec<StringRecord>) -> Self {
        Table { headers, rows }
    }

    /// Header record
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Data rows in file order
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column named `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Keep only the rows whose 0-based position satisfies `keep`.
    ///
    /// Relative order of the kept rows is preserved.
    pub fn retain_positions<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize) -> bool,
    {
        let rows = std::mem::take(&mut self.rows);
        self.rows = rows
            .into_iter()
            .enumerate()
            .filter_map(|(position, row)| keep(position).then_some(row))
            .collect();
    }

    /// Replace every value of column `column` with `value(row_position)`
    pub fn set_column<F>(&mut self, column: usize, mut value: F)
    where
        F: FnMut(usize) -> String,
    {
        for (position, row) in self.rows.iter_mut().enumerate() {
            let replacement = value(position);
            *row = row
                .iter()
                .enumerate()
                .map(|(j, field)| if j == column { replacement.as_str() } else { field })
                .collect();
        }
    }

    /// Rename header cells that hold the mis-decoded iterations column.
    ///
    /// Returns the number of renamed cells.
    pub fn repair_headers(&mut self) -> usize {
        let mut repaired = 0;
        self.headers = self
            .headers
            .iter()
            .map(|header| {
                if header == MANGLED_ITERATIONS_COLUMN {
                    repaired += 1;
                    ITERATIONS_COLUMN
                } else {
                    header
                }
            })
            .collect();
        repaired
    }
}
