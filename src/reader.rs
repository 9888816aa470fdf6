//! CSV ingestion
//!
//! Loads a whole delimited file into memory as a [`RowSet`]. The first record
//! supplies the column names; every later record is data.

use crate::error::{LoadError, Result};
use crate::types::{RaggedRowPolicy, RowSet};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Reads CSV input into a rectangular [`RowSet`]
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    policy: RaggedRowPolicy,
}

impl CsvReader {
    pub fn new(policy: RaggedRowPolicy) -> Self {
        CsvReader { policy }
    }

    /// Read and parse the file at `path`. The entire file must fit in memory.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<RowSet> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse(&data)
    }

    /// Parse CSV from any reader
    pub fn read<R: Read>(&self, mut input: R) -> Result<RowSet> {
        let mut data = Vec::new();
        input.read_to_end(&mut data).map_err(csv::Error::from)?;

        self.parse(&data)
    }

    fn parse(&self, data: &[u8]) -> Result<RowSet> {
        check_quoting(data)?;

        // Widths are checked here rather than by the csv crate so the policy
        // can decide what a mismatch means.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        let mut records = reader.records();

        let header: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Err(LoadError::EmptyInput),
        };
        info!("CSV header: {:?}", header);

        let width = header.len();
        let mut rows = Vec::new();

        for record in records {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();

            if row.len() != width {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                match self.policy {
                    RaggedRowPolicy::Reject => {
                        return Err(LoadError::RaggedRow {
                            line,
                            expected: width,
                            found: row.len(),
                        });
                    }
                    RaggedRowPolicy::Conform => {
                        warn!(
                            "Line {} has {} fields, conforming to {}",
                            line,
                            row.len(),
                            width
                        );
                        row.resize(width, String::new());
                    }
                }
            }

            rows.push(row);
        }

        Ok(RowSet::new(header, rows))
    }
}

/// Reject quoting the csv crate would otherwise accept leniently: a quoted
/// field that never closes or has text after its closing quote, and a `"`
/// inside an unquoted field.
fn check_quoting(data: &[u8]) -> Result<()> {
    let mut line: u64 = 1;
    let mut field_start = true;
    let mut i = 0;

    while i < data.len() {
        if field_start && data[i] == b'"' {
            let opened_on = line;
            i += 1;
            loop {
                match data.get(i) {
                    None => {
                        return Err(LoadError::MalformedQuote {
                            line: opened_on,
                            reason: "quoted field is never closed",
                        });
                    }
                    Some(b'"') => match data.get(i + 1) {
                        Some(b'"') => i += 2,
                        None | Some(b',') | Some(b'\n') | Some(b'\r') => {
                            i += 1;
                            break;
                        }
                        Some(_) => {
                            return Err(LoadError::MalformedQuote {
                                line,
                                reason: "unexpected text after closing quote",
                            });
                        }
                    },
                    Some(b'\n') => {
                        line += 1;
                        i += 1;
                    }
                    Some(_) => i += 1,
                }
            }
            field_start = false;
            continue;
        }

        match data[i] {
            b',' => field_start = true,
            b'\n' => {
                line += 1;
                field_start = true;
            }
            b'"' => {
                return Err(LoadError::MalformedQuote {
                    line,
                    reason: "bare quote in unquoted field",
                });
            }
            _ => field_start = false,
        }
        i += 1;
    }

    Ok(())
}

/// Read `path` with the default (rejecting) policy
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<RowSet> {
    CsvReader::default().read_path(path)
}
