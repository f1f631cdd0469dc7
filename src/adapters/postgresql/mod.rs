//! PostgreSQL database integration
//!
//! This module provides the client that reads the publications database.

pub mod client;

pub use client::{redact_connection_string, PostgreSQLClient};
