//! Delimited-text reading and writing for [`Table`].
//!
//! Files are read fully into memory, parsed with a header row, and written
//! back by serialising to a buffer first so the target is only opened for
//! writing once the new content is complete.

use super::Table;
use crate::core::constants::DEFAULT_DELIMITER;
use crate::core::error::{Result, SamplerError};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// CSV dialect used for simulation output tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: u8,
    /// Quote character
    pub quote: u8,
    /// Rename mis-decoded header cells on read
    pub repair_headers: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            delimiter: DEFAULT_DELIMITER,
            quote: b'"',
            repair_headers: true,
        }
    }
}

/// Reads and writes [`Table`]s in one CSV dialect
#[derive(Debug, Clone, Default)]
pub struct CsvTableIo {
    config: CsvConfig,
}

impl CsvTableIo {
    /// Create a reader/writer with the default dialect
    pub fn new() -> Self {
        Self::default()
    }

    /// Set delimiter character
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set quote character
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.config.quote = quote;
        self
    }

    /// Enable or disable header repair
    pub fn with_header_repair(mut self, enabled: bool) -> Self {
        self.config.repair_headers = enabled;
        self
    }

    /// Get the dialect
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Read the table stored at `path`
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        self.parse(path, &bytes)
    }

    /// Parse `bytes` as a table; `path` is used in error messages only
    pub fn parse(&self, path: &Path, bytes: &[u8]) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| SamplerError::table(path, format!("Failed to read headers: {}", e)))?
            .clone();

        if headers.is_empty() {
            return Err(SamplerError::table(path, "file has no header row"));
        }

        // Short rows are padded with empty fields, long rows are rejected
        let width = headers.len();
        let mut rows = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let mut record = result.map_err(|e| {
                SamplerError::table(path, format!("parse error at data row {}: {}", line + 1, e))
            })?;
            if record.len() > width {
                return Err(SamplerError::table(
                    path,
                    format!(
                        "parse error at data row {}: expected {} fields, found {}",
                        line + 1,
                        width,
                        record.len()
                    ),
                ));
            }
            while record.len() < width {
                record.push_field("");
            }
            rows.push(record);
        }

        let mut table = Table::new(headers, rows);
        if self.config.repair_headers {
            let repaired = table.repair_headers();
            if repaired > 0 {
                log::debug!(
                    "Repaired {} mis-decoded header cell(s) in {}",
                    repaired,
                    path.display()
                );
            }
        }

        log::debug!(
            "Read {} rows with {} columns from {}",
            table.num_rows(),
            table.num_columns(),
            path.display()
        );
        Ok(table)
    }

    /// Serialise `table`, header first
    pub fn to_bytes(&self, table: &Table) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(table.headers())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| SamplerError::from(e.into_error()))
    }

    /// Replace the content of `path` with `table`
    pub fn write<P: AsRef<Path>>(&self, path: P, table: &Table) -> Result<()> {
        let bytes = self.to_bytes(table)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
