//! Best-effort record reader
//!
//! The export never stops on a failed query: the failure is logged and the
//! caller sees an empty row set, exactly as if nothing matched.

use super::traits::Database;
use crate::domain::Row;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Wraps a [`Database`] with the best-effort failure policy
pub struct RecordReader {
    database: Arc<dyn Database>,
    failed_queries: AtomicUsize,
}

impl RecordReader {
    pub fn new(database: Arc<dyn Database>) -> Self {
        Self {
            database,
            failed_queries: AtomicUsize::new(0),
        }
    }

    /// Runs a query, returning no rows if it fails
    pub async fn get_recordset(&self, sql: &str, param: Option<i64>) -> Vec<Row> {
        match self.database.query(sql, param).await {
            Ok(rows) => {
                tracing::trace!(rows = rows.len(), param = ?param, "Query returned");
                rows
            }
            Err(e) => {
                self.failed_queries.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    error = %e,
                    param = ?param,
                    sql = %sql,
                    "Query failed, continuing without rows"
                );
                Vec::new()
            }
        }
    }

    /// Number of queries that failed so far
    pub fn failed_queries(&self) -> usize {
        self.failed_queries.load(Ordering::Relaxed)
    }

    pub fn database(&self) -> &Arc<dyn Database> {
        &self.database
    }
}
