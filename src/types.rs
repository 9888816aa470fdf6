use serde::Serialize;

/// The parsed contents of a CSV file: one header row plus data rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSet {
    /// Field names from the first row
    pub header: Vec<String>,

    /// Data rows, each conformed to `header.len()` fields
    pub rows: Vec<Vec<String>>,
}

impl RowSet {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RowSet { header, rows }
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A table to be created: a name and its untyped columns, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<String>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        TableDefinition {
            name: name.into(),
            columns,
        }
    }
}

/// What the reader does with a data row whose width differs from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaggedRowPolicy {
    /// Fail the read, naming the offending line
    #[default]
    Reject,
    /// Pad short rows with empty text and truncate long ones
    Conform,
}

/// Configuration for a single CSV load
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Destination table name (used verbatim, not escaped)
    pub table_name: String,

    /// SQLite location; `:memory:` keeps everything in process
    pub database: String,

    /// Upper bound on bound parameters in one INSERT statement
    pub max_params_per_statement: usize,

    /// Handling of rows whose field count differs from the header
    pub ragged_rows: RaggedRowPolicy,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            table_name: String::from("csvimport"),
            database: String::from(":memory:"),
            max_params_per_statement: 900,
            ragged_rows: RaggedRowPolicy::Reject,
        }
    }
}

/// Summary of a completed load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub table: String,

    /// Column names in table order
    pub columns: Vec<String>,

    pub rows_inserted: usize,
    pub batch_size: usize,
    pub batches: usize,
}

impl LoadReport {
    /// The table this load created
    pub fn table_definition(&self) -> TableDefinition {
        TableDefinition::new(self.table.clone(), self.columns.clone())
    }
}
