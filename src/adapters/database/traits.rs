//! Database abstraction traits
//!
//! This module defines the trait the publications database adapter must
//! implement to be read by the export.

use crate::domain::{Result, Row};
use async_trait::async_trait;

/// Read-only access to the publications database
///
/// Implementations hold a single connection for the whole run and execute
/// one statement at a time.
#[async_trait]
pub trait Database: Send + Sync {
    /// Runs a query with at most one bound parameter
    ///
    /// # Arguments
    ///
    /// * `sql` - Query text; a parameter is referenced as `$1`
    /// * `param` - Value bound to `$1`, usually a publication identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be executed or a row cannot be
    /// converted.
    async fn query(&self, sql: &str, param: Option<i64>) -> Result<Vec<Row>>;

    /// Short description of the connection target, safe to log
    fn describe(&self) -> String;

    /// Releases the connection
    ///
    /// The default implementation does nothing.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
