//! Table creation and batched loading
//!
//! Everything here talks to storage through [`SqlExecutor`], so the loader
//! does not care which engine sits behind it.

pub mod batch;
pub mod executor;
pub mod loader;
pub mod schema;

pub use batch::{flatten_params, insert_sql, BatchPlan};
pub use executor::SqlExecutor;
pub use loader::TableLoader;
pub use schema::is_plain_identifier;
