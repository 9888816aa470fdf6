//! CREATE TABLE generation
//!
//! Columns are declared without a type so the database applies its loosest
//! affinity. Names are used verbatim: no quoting, no deduplication.

use crate::types::TableDefinition;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{info, warn};

static PLAIN_IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

impl TableDefinition {
    /// Derive a table from CSV field names.
    ///
    /// `_rows` is accepted so column types can later be inferred from data;
    /// it is currently unused.
    pub fn from_header(name: impl Into<String>, header: &[String], _rows: &[Vec<String>]) -> Self {
        let table = TableDefinition::new(name, header.to_vec());
        table.warn_suspicious_columns();
        table
    }

    /// Render the CREATE TABLE statement
    pub fn create_sql(&self) -> String {
        let mut sql = String::new();
        sql.push_str("CREATE TABLE ");
        sql.push_str(&self.name);
        sql.push_str(" (\n");

        for (i, column) in self.columns.iter().enumerate() {
            if i != 0 {
                sql.push_str(", \n");
            }
            sql.push('\t');
            sql.push_str(column);
        }

        sql.push_str("\n);");

        info!("Created schema from CSV:\n{}", sql);
        sql
    }

    /// Column names that would need quoting to be valid SQL identifiers
    pub fn unquoted_unsafe_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| !is_plain_identifier(c))
            .map(String::as_str)
            .collect()
    }

    /// Column names that appear more than once, in first-repeat order
    pub fn duplicate_columns(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for column in &self.columns {
            let key = column.to_ascii_lowercase();
            if !seen.insert(key) && !duplicates.contains(&column.as_str()) {
                duplicates.push(column.as_str());
            }
        }
        duplicates
    }

    fn warn_suspicious_columns(&self) {
        for column in self.unquoted_unsafe_columns() {
            warn!("Column {:?} is not a plain identifier and is not escaped", column);
        }
        for column in self.duplicate_columns() {
            warn!("Column {:?} appears more than once", column);
        }
    }
}

/// True when `name` can appear in SQL without quoting
pub fn is_plain_identifier(name: &str) -> bool {
    PLAIN_IDENTIFIER_REGEX.is_match(name)
}
