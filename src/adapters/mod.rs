//! External system integrations for dcexport.
//!
//! This module provides adapters for integrating with external systems:
//!
//! - [`database`] - Database abstraction layer (trait-based) and the queries
//! - [`postgresql`] - PostgreSQL implementation
//!
//! # Design Pattern
//!
//! The export only sees the [`database::Database`] trait, so it can be driven
//! by an in-memory implementation in tests.
//!
//! ```rust,no_run
//! use dcexport::adapters::postgresql::PostgreSQLClient;
//! use dcexport::adapters::database::{queries, Database};
//! use dcexport::config::{secret_string, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DatabaseConfig {
//!     connection_string: secret_string("postgresql://reader@localhost/pubs".to_string()),
//!     connect_timeout_seconds: 30,
//!     statement_timeout_seconds: 60,
//!     ssl_mode: "disable".to_string(),
//! };
//!
//! let client = PostgreSQLClient::connect(&config).await?;
//! let rows = client.query(queries::AUTHORS, Some(7)).await?;
//! println!("{} author(s)", rows.len());
//! client.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
