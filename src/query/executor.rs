use std::sync::Arc;

use super::store::DataStore;
use super::types::{ResultTable, Row};
use crate::error::ExecutionError;

/// Runs statements against the local store and shapes the rows into a
/// [`ResultTable`].
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn DataStore>,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self, statement: &str) -> Result<ResultTable, ExecutionError> {
        if statement.trim().is_empty() {
            return Err(ExecutionError::new("empty statement"));
        }

        let raw = self.store.query(statement)?;

        let mut table = ResultTable::new();
        for values in raw.rows {
            if values.len() != raw.columns.len() {
                return Err(ExecutionError::new(format!(
                    "row has {} values for {} columns",
                    values.len(),
                    raw.columns.len()
                )));
            }

            let mut row = Row::new();
            for (column, value) in raw.columns.iter().zip(values) {
                row.insert(column.as_str(), value);
            }
            table.push(row);
        }

        Ok(table)
    }

    /// [`execute`](Self::execute) on tokio's blocking pool, keeping store I/O
    /// off the async workers.
    pub async fn execute_blocking(&self, statement: String) -> Result<ResultTable, ExecutionError> {
        let executor = self.clone();
        tokio::task::spawn_blocking(move || executor.execute(&statement))
            .await
            .map_err(|e| ExecutionError::new(format!("query task failed: {}", e)))?
    }
}
