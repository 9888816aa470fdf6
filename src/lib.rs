//! # csvnorm - CSV to SQL Loader
//!
//! Reads a CSV file, derives a flat table from its header, creates that
//! table in a SQL database and bulk-loads the rows with bound parameters.
//!
//! ## Modules
//!
//! - **reader**: Load a CSV file into memory as a header plus data rows
//! - **load**: Generate `CREATE TABLE`, plan batches, run batched `INSERT`s
//! - **normalize**: Pluggable normal-form advisors (none registered by default)
//! - **logging**: Build the logger handed to the loader
//!
//! ## Quick Start
//!
//! ```rust
//! use csvnorm::{logging, CsvReader, TableLoader};
//! use rusqlite::Connection;
//!
//! # fn main() -> anyhow::Result<()> {
//! let rows = CsvReader::default().read("name,age\nAlice,30\nBob,25\n".as_bytes())?;
//!
//! let mut conn = Connection::open_in_memory()?;
//! let mut loader = TableLoader::new(&mut conn, "csvimport", logging::silent());
//! let report = loader.load(&rows)?;
//!
//! assert_eq!(report.rows_inserted, 2);
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use tracing::Dispatch;

pub mod error;
pub mod load;
pub mod logging;
pub mod normalize;
pub mod reader;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{LoadError, Result};
pub use load::{BatchPlan, SqlExecutor, TableLoader};
pub use normalize::{AdvisorRegistry, NormalFormAdvisor, Recommendation};
pub use reader::{read_csv, CsvReader};
pub use types::{LoadConfig, LoadReport, RaggedRowPolicy, RowSet, TableDefinition};

/// Main entry point: read the CSV at `path` and load it into `executor`.
///
/// Every failure is logged through `dispatch` before it is returned.
pub fn load_csv<P, E>(path: P, executor: E, config: &LoadConfig, dispatch: Dispatch) -> Result<LoadReport>
where
    P: AsRef<Path>,
    E: SqlExecutor,
{
    let path = path.as_ref();
    let rows = tracing::dispatcher::with_default(&dispatch, || {
        CsvReader::new(config.ragged_rows)
            .read_path(path)
            .inspect_err(|e| tracing::error!("Error in reading csv {}: {}", path.display(), e))
    })?;

    TableLoader::new(executor, config.table_name.as_str(), dispatch)
        .with_max_params(config.max_params_per_statement)
        .load(&rows)
}
