//! Errors raised while reading, creating and loading
//!
//! Reading failures (`Io`, `Csv`, `MalformedQuote`, `EmptyInput`, `RaggedRow`)
//! and planning failures (`NoColumns`, `TooManyColumns`) happen before any
//! statement runs. `CreateTable` and `InsertBatch` come from the database.

use std::path::PathBuf;
use thiserror::Error;

/// Error type surfaced by a storage backend
pub type ExecError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file could not be opened or read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The csv parser rejected the input (for example invalid UTF-8)
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// An unterminated quoted field, text after a closing quote, or a `"`
    /// inside an unquoted field
    #[error("malformed CSV on line {line}: {reason}")]
    MalformedQuote { line: u64, reason: &'static str },

    #[error("CSV input has no header row")]
    EmptyInput,

    /// A data row's width differs from the header's
    #[error("line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("table has no columns")]
    NoColumns,

    /// Even a single row would exceed the bound parameter ceiling
    #[error("table has {columns} columns, at most {max} fit in one statement")]
    TooManyColumns { columns: usize, max: usize },

    #[error("failed to create table {table}: {source}")]
    CreateTable {
        table: String,
        #[source]
        source: ExecError,
    },

    /// Batch `index` (0-based) failed; the `rows_committed` rows before it
    /// remain in the table
    #[error("insert batch {index} of {count} failed after {rows_committed} rows: {source}")]
    InsertBatch {
        index: usize,
        count: usize,
        rows_committed: usize,
        #[source]
        source: ExecError,
    },

    #[error("advisor {name} failed: {source}")]
    Advisor {
        name: String,
        #[source]
        source: ExecError,
    },
}

impl LoadError {
    /// True for errors caused by syntactically invalid delimited text
    pub fn is_parse_error(&self) -> bool {
        matches!(self, LoadError::Csv(_) | LoadError::MalformedQuote { .. })
    }
}
