use crate::error::ExecError;
use rusqlite::{params_from_iter, Connection};

/// The one capability the loader needs from a database: run a statement
/// with positional text parameters
pub trait SqlExecutor {
    /// Execute `sql` binding `params` in order, returning the affected row count
    fn execute_bound(&mut self, sql: &str, params: &[&str]) -> Result<usize, ExecError>;
}

impl<E: SqlExecutor + ?Sized> SqlExecutor for &mut E {
    fn execute_bound(&mut self, sql: &str, params: &[&str]) -> Result<usize, ExecError> {
        (**self).execute_bound(sql, params)
    }
}

impl SqlExecutor for Connection {
    fn execute_bound(&mut self, sql: &str, params: &[&str]) -> Result<usize, ExecError> {
        Ok(self.execute(sql, params_from_iter(params.iter()))?)
    }
}
