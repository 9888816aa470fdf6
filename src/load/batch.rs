//! Batch planning for multi-row INSERT statements
//!
//! Embedded engines cap the number of bound parameters per statement, so rows
//! are grouped such that `rows_in_batch * columns` never exceeds the ceiling.

use crate::error::{LoadError, Result};
use std::ops::Range;

/// How a row set is divided into INSERT statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// Rows per statement (the last batch may be shorter)
    pub batch_size: usize,

    /// Number of statements needed; zero when there are no rows
    pub batch_count: usize,

    pub total_rows: usize,
}

impl BatchPlan {
    /// Plan batches for `total_rows` rows of `columns` fields each
    pub fn new(columns: usize, total_rows: usize, max_params: usize) -> Result<Self> {
        if columns == 0 {
            return Err(LoadError::NoColumns);
        }
        if columns > max_params {
            return Err(LoadError::TooManyColumns {
                columns,
                max: max_params,
            });
        }

        let batch_size = max_params / columns;
        let batch_count = total_rows.div_ceil(batch_size);

        Ok(BatchPlan {
            batch_size,
            batch_count,
            total_rows,
        })
    }

    /// Row index range covered by batch `index`
    pub fn range(&self, index: usize) -> Range<usize> {
        let start = (self.batch_size * index).min(self.total_rows);
        let end = (start + self.batch_size).min(self.total_rows);
        start..end
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.batch_count).map(move |i| self.range(i))
    }
}

/// Render `INSERT INTO t(a, b) VALUES (?, ?), (?, ?);` with one placeholder
/// group per row
pub fn insert_sql(table: &str, columns: &[String], rows: usize) -> String {
    let group = format!("({})", vec!["?"; columns.len()].join(", "));

    let mut sql = String::new();
    sql.push_str("INSERT INTO ");
    sql.push_str(table);
    sql.push('(');
    sql.push_str(&columns.join(", "));
    sql.push_str(") VALUES ");

    for i in 0..rows {
        if i != 0 {
            sql.push_str(", ");
        }
        sql.push_str(&group);
    }
    sql.push(';');

    sql
}

/// Flatten rows into a single positional parameter list, row-major
pub fn flatten_params(rows: &[Vec<String>]) -> Vec<&str> {
    rows.iter()
        .flat_map(|row| row.iter().map(String::as_str))
        .collect()
}
