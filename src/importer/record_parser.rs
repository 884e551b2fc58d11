// ==========================================
// footy-stats - record parser
// ==========================================
// Raw delimited text -> ordered RawRecord sequence.
// Trims every field, skips fully empty lines, skips comment lines
// (configurable prefix, not counted as rows). A missing header or a
// row whose column count differs from the header aborts the parse;
// malformed rows are never repaired here.
// ==========================================

use crate::domain::import::RawRecord;
use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;

// ==========================================
// ParserOptions
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Lines starting with this byte are skipped entirely.
    /// None disables comment handling.
    pub comment_prefix: Option<u8>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            comment_prefix: Some(b'#'),
        }
    }
}

// ==========================================
// RecordParser
// ==========================================
pub struct RecordParser {
    options: ParserOptions,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser {
    pub fn new() -> Self {
        Self {
            options: ParserOptions::default(),
        }
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parse CSV text into RawRecords
    ///
    /// # Returns
    /// - Ok(records): one entry per counted data row, input order.
    ///   Zero rows is a valid outcome.
    /// - Err: header missing, column-count mismatch, or unreadable CSV
    pub fn parse(&self, text: &str) -> ImportResult<Vec<RawRecord>> {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(true)
            .trim(Trim::All)
            .flexible(false)
            .comment(self.options.comment_prefix);

        let mut reader = builder.from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::CsvParseError(e.to_string()))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader);
        }

        let mut records = Vec::new();
        let mut row_number = 0;
        for result in reader.records() {
            let record = result.map_err(|e| Self::map_csv_error(e, row_number + 1))?;

            let mut fields = HashMap::with_capacity(headers.len());
            for (idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(idx) {
                    fields.insert(header.clone(), value.to_string());
                }
            }

            // fully empty lines are not rows
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            row_number += 1;
            records.push(RawRecord { row_number, fields });
        }

        Ok(records)
    }

    fn map_csv_error(err: csv::Error, row: usize) -> ImportError {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => ImportError::ColumnCountMismatch {
                row,
                expected: *expected_len as usize,
                found: *len as usize,
            },
            _ => ImportError::CsvParseError(err.to_string()),
        }
    }
}
