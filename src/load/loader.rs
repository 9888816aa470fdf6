//! Schema creation followed by batched inserts
//!
//! Each batch is its own statement, so a failure part way through leaves the
//! earlier batches committed.

use crate::error::{LoadError, Result};
use crate::load::batch::{flatten_params, insert_sql, BatchPlan};
use crate::load::executor::SqlExecutor;
use crate::types::{LoadReport, RowSet, TableDefinition};
use tracing::{debug, error, info, Dispatch};

/// Creates a table from a [`RowSet`] and bulk-inserts its rows in batches
pub struct TableLoader<E: SqlExecutor> {
    executor: E,
    table_name: String,
    max_params: usize,
    dispatch: Dispatch,
}

impl<E: SqlExecutor> TableLoader<E> {
    pub fn new(executor: E, table_name: impl Into<String>, dispatch: Dispatch) -> Self {
        TableLoader {
            executor,
            table_name: table_name.into(),
            max_params: 900,
            dispatch,
        }
    }

    /// Override the per-statement bound parameter ceiling
    pub fn with_max_params(mut self, max_params: usize) -> Self {
        self.max_params = max_params;
        self
    }

    /// Create the table, then insert every row in order.
    ///
    /// Batches run as independent statements. A failing batch stops the load;
    /// batches before it stay committed.
    pub fn load(&mut self, rows: &RowSet) -> Result<LoadReport> {
        let dispatch = self.dispatch.clone();
        tracing::dispatcher::with_default(&dispatch, || self.run(rows))
    }

    pub fn into_inner(self) -> E {
        self.executor
    }

    fn run(&mut self, rows: &RowSet) -> Result<LoadReport> {
        // Plan before touching the database so an unloadable width creates nothing
        let plan = BatchPlan::new(rows.column_count(), rows.row_count(), self.max_params)
            .inspect_err(|e| error!("Cannot load into {}: {}", self.table_name, e))?;

        let table = TableDefinition::from_header(self.table_name.as_str(), &rows.header, &rows.rows);
        self.create_table(&table)?;

        let rows_inserted = self.insert_batches(&table, &rows.rows, &plan)?;

        Ok(LoadReport {
            table: table.name,
            columns: table.columns,
            rows_inserted,
            batch_size: plan.batch_size,
            batches: plan.batch_count,
        })
    }

    fn create_table(&mut self, table: &TableDefinition) -> Result<()> {
        let sql = table.create_sql();
        self.executor
            .execute_bound(&sql, &[])
            .map_err(|source| {
                error!("Error in creating table {}", table.name);
                LoadError::CreateTable {
                    table: table.name.clone(),
                    source,
                }
            })?;
        Ok(())
    }

    fn insert_batches(
        &mut self,
        table: &TableDefinition,
        data: &[Vec<String>],
        plan: &BatchPlan,
    ) -> Result<usize> {
        info!(
            "Loading {} rows of data, {} fields per row",
            data.len(),
            table.columns.len()
        );
        debug!("Batch size: {}", plan.batch_size);
        debug!("Batch count: {}", plan.batch_count);

        let mut committed = 0;
        for (index, range) in plan.ranges().enumerate() {
            let batch = &data[range];
            let sql = insert_sql(&table.name, &table.columns, batch.len());
            let params = flatten_params(batch);

            if let Err(source) = self.executor.execute_bound(&sql, &params) {
                error!(
                    "Error at batch {} of {}, {} rows committed",
                    index, plan.batch_count, committed
                );
                return Err(LoadError::InsertBatch {
                    index,
                    count: plan.batch_count,
                    rows_committed: committed,
                    source,
                });
            }

            committed += batch.len();
        }

        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecError;
    use crate::logging;

    /// Records every statement; optionally fails the nth call
    #[derive(Default)]
    struct RecordingExecutor {
        statements: Vec<(String, Vec<String>)>,
        fail_at: Option<usize>,
    }

    impl SqlExecutor for RecordingExecutor {
        fn execute_bound(&mut self, sql: &str, params: &[&str]) -> std::result::Result<usize, ExecError> {
            if self.fail_at == Some(self.statements.len()) {
                return Err("injected failure".into());
            }
            self.statements
                .push((sql.to_string(), params.iter().map(|p| p.to_string()).collect()));
            Ok(0)
        }
    }

    fn row_set(header: &[&str], rows: &[&[&str]]) -> RowSet {
        RowSet::new(
            header.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_example_statements() {
        let rows = row_set(&["name", "age"], &[&["Alice", "30"], &["Bob", "25"]]);
        let mut loader = TableLoader::new(RecordingExecutor::default(), "csvimport", logging::silent());

        let report = loader.load(&rows).unwrap();
        assert_eq!(report.rows_inserted, 2);
        assert_eq!(report.batches, 1);
        assert_eq!(report.columns, vec!["name", "age"]);

        let statements = loader.into_inner().statements;
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].0, "CREATE TABLE csvimport (\n\tname, \n\tage\n);");
        assert!(statements[0].1.is_empty());
        assert_eq!(
            statements[1].0,
            "INSERT INTO csvimport(name, age) VALUES (?, ?), (?, ?);"
        );
        assert_eq!(statements[1].1, vec!["Alice", "30", "Bob", "25"]);
    }

    #[test]
    fn test_header_only_issues_no_insert() {
        let rows = row_set(&["a", "b"], &[]);
        let mut loader = TableLoader::new(RecordingExecutor::default(), "t", logging::silent());

        let report = loader.load(&rows).unwrap();
        assert_eq!(report.batches, 0);
        assert_eq!(report.rows_inserted, 0);
        assert_eq!(loader.into_inner().statements.len(), 1);
    }

    #[test]
    fn test_batches_respect_ceiling() {
        let data: Vec<Vec<&str>> = (0..5).map(|_| vec!["x", "y", "z"]).collect();
        let data: Vec<&[&str]> = data.iter().map(|r| r.as_slice()).collect();
        let rows = row_set(&["a", "b", "c"], &data);

        let mut loader = TableLoader::new(RecordingExecutor::default(), "t", logging::silent())
            .with_max_params(6);
        let report = loader.load(&rows).unwrap();
        assert_eq!(report.batch_size, 2);
        assert_eq!(report.batches, 3);

        let statements = loader.into_inner().statements;
        let param_counts: Vec<usize> = statements[1..].iter().map(|(_, p)| p.len()).collect();
        assert_eq!(param_counts, vec![6, 6, 3]);
    }

    #[test]
    fn test_too_wide_creates_nothing() {
        let header: Vec<String> = (0..901).map(|i| format!("c{i}")).collect();
        let rows = RowSet::new(header, vec![]);
        let mut loader = TableLoader::new(RecordingExecutor::default(), "t", logging::silent());

        let err = loader.load(&rows).unwrap_err();
        assert!(matches!(err, LoadError::TooManyColumns { columns: 901, .. }));
        assert!(loader.into_inner().statements.is_empty());
    }

    #[test]
    fn test_failing_batch_reports_progress() {
        let data: Vec<Vec<&str>> = (0..5).map(|_| vec!["v"]).collect();
        let data: Vec<&[&str]> = data.iter().map(|r| r.as_slice()).collect();
        let rows = row_set(&["a"], &data);

        // call 0 is CREATE TABLE, calls 1 and 2 are the first two batches
        let executor = RecordingExecutor {
            fail_at: Some(3),
            ..Default::default()
        };
        let mut loader = TableLoader::new(executor, "t", logging::silent()).with_max_params(2);

        match loader.load(&rows).unwrap_err() {
            LoadError::InsertBatch {
                index,
                count,
                rows_committed,
                ..
            } => {
                assert_eq!(index, 2);
                assert_eq!(count, 3);
                assert_eq!(rows_committed, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_create_failure_is_reported() {
        let executor = RecordingExecutor {
            fail_at: Some(0),
            ..Default::default()
        };
        let rows = row_set(&["a"], &[&["1"]]);
        let mut loader = TableLoader::new(executor, "t", logging::silent());

        assert!(matches!(
            loader.load(&rows).unwrap_err(),
            LoadError::CreateTable { .. }
        ));
    }
}
