use async_trait::async_trait;

use crate::{Result, Value};

/// One result row.
pub type Row = Vec<Value>;

/// Outcome of a data-modifying statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOutcome {
    pub affected_rows: u64,
    pub last_insert_id: u64,
}

/// Database execution seam. The production implementation wraps a
/// MySQL connection pool; tests substitute a scripted mock.
#[async_trait]
pub trait Executor: Send {
    /// Runs a data-modifying statement with positional parameters.
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecOutcome>;

    /// Runs a query and collects all rows.
    async fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;
}
