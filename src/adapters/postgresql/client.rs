//! PostgreSQL client implementation
//!
//! This module provides the single-connection client used to read the
//! publications database.

use crate::adapters::database::traits::Database;
use crate::config::schema::DatabaseConfig;
use crate::core::dublin_core::sanitize::repair_utf8;
use crate::domain::{DcExportError, Result, Row};
use async_trait::async_trait;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_postgres::config::SslMode;
use tokio_postgres::types::Type;
use tokio_postgres::{Client, Connection, NoTls};

/// PostgreSQL client for dcexport
///
/// Holds one connection for the lifetime of the run. Statements are
/// serialized through a mutex, so there is never more than one in flight.
pub struct PostgreSQLClient {
    client: Mutex<Option<Client>>,
    connection_task: Mutex<Option<JoinHandle<()>>>,
    target: String,
}

impl PostgreSQLClient {
    /// Connect to PostgreSQL
    ///
    /// # Arguments
    ///
    /// * `config` - Database configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unparsable connection string and
    /// a connection error if the server cannot be reached in time.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_ref()
            .parse()
            .map_err(|e| {
                DcExportError::Configuration(format!("Invalid PostgreSQL connection string: {e}"))
            })?;

        let timeout = Duration::from_secs(config.connect_timeout_seconds);
        pg_config.connect_timeout(timeout);

        let target = redact_connection_string(config.connection_string.expose_secret().as_ref());

        let (client, connection_task) = match config.ssl_mode.as_str() {
            "disable" => {
                pg_config.ssl_mode(SslMode::Disable);
                let (client, connection) =
                    tokio::time::timeout(timeout, pg_config.connect(NoTls))
                        .await
                        .map_err(|_| connect_timed_out(&target, timeout))?
                        .map_err(|e| connect_failed(&target, e))?;
                (client, spawn_connection(connection))
            }
            mode => {
                pg_config.ssl_mode(if mode == "require" {
                    SslMode::Require
                } else {
                    SslMode::Prefer
                });
                let connector = TlsConnector::builder().build().map_err(|e| {
                    DcExportError::Configuration(format!("Failed to build TLS connector: {e}"))
                })?;
                let (client, connection) = tokio::time::timeout(
                    timeout,
                    pg_config.connect(MakeTlsConnector::new(connector)),
                )
                .await
                .map_err(|_| connect_timed_out(&target, timeout))?
                .map_err(|e| connect_failed(&target, e))?;
                (client, spawn_connection(connection))
            }
        };

        client
            .batch_execute(&format!(
                "SET statement_timeout = {}",
                config.statement_timeout_seconds * 1000
            ))
            .await
            .map_err(|e| DcExportError::Database(format!("Failed to set statement timeout: {e}")))?;

        tracing::info!(target_db = %target, ssl_mode = %config.ssl_mode, "Connected to PostgreSQL");

        Ok(Self {
            client: Mutex::new(Some(client)),
            connection_task: Mutex::new(Some(connection_task)),
            target,
        })
    }
}

#[async_trait]
impl Database for PostgreSQLClient {
    async fn query(&self, sql: &str, param: Option<i64>) -> Result<Vec<Row>> {
        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| DcExportError::Connection("Connection already closed".to_string()))?;

        let rows = match param {
            Some(value) => client.query(sql, &[&value]).await,
            None => client.query(sql, &[]).await,
        }
        .map_err(|e| DcExportError::Database(format!("Query failed: {e}")))?;

        Ok(readable_rows(rows.iter().map(convert_row)))
    }

    fn describe(&self) -> String {
        self.target.clone()
    }

    async fn close(&self) -> Result<()> {
        // Dropping the client ends the connection future
        drop(self.client.lock().await.take());

        if let Some(task) = self.connection_task.lock().await.take() {
            task.await
                .map_err(|e| DcExportError::Connection(format!("Connection task failed: {e}")))?;
        }

        tracing::info!(target_db = %self.target, "Disconnected from PostgreSQL");
        Ok(())
    }
}

fn spawn_connection<S, T>(connection: Connection<S, T>) -> JoinHandle<()>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!(error = %e, "PostgreSQL connection error");
        }
    })
}

fn connect_failed(target: &str, err: tokio_postgres::Error) -> DcExportError {
    DcExportError::Connection(format!("Failed to connect to {target}: {err}"))
}

fn connect_timed_out(target: &str, timeout: Duration) -> DcExportError {
    DcExportError::Connection(format!(
        "Timed out after {}s connecting to {target}",
        timeout.as_secs()
    ))
}

/// Keeps the rows that converted, logging and dropping the rest
///
/// One unreadable row must not cost the other rows of the result set.
fn readable_rows(rows: impl IntoIterator<Item = Result<Row>>) -> Vec<Row> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match row {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(row = index, error = %e, "Skipping unreadable row");
                None
            }
        })
        .collect()
}

/// Converts a driver row into a column map
fn convert_row(row: &tokio_postgres::Row) -> Result<Row> {
    let mut converted = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let value = column_value(row, idx, column.type_()).map_err(|e| {
            DcExportError::Database(format!(
                "Cannot read column '{}' ({}): {}",
                column.name(),
                column.type_(),
                e
            ))
        })?;
        converted.insert(column.name(), value);
    }
    Ok(converted)
}

fn column_value(
    row: &tokio_postgres::Row,
    idx: usize,
    ty: &Type,
) -> std::result::Result<Value, tokio_postgres::Error> {
    let value = if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)?.map(Value::from)
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)?.map(Value::from)
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)?.map(Value::from)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)?
            .map(|v| Value::from(f64::from(v)))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)?.map(Value::from)
    } else if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)?.map(Value::from)
    } else if *ty == Type::BYTEA {
        row.try_get::<_, Option<Vec<u8>>>(idx)?
            .map(|raw| Value::from(repair_utf8(&raw)))
    } else {
        // TEXT, VARCHAR, BPCHAR, NAME and unknown literals; anything else
        // surfaces as a WrongType error here
        row.try_get::<_, Option<String>>(idx)?.map(Value::from)
    };
    Ok(value.unwrap_or(Value::Null))
}

/// Strips credentials from a connection string for logging
pub fn redact_connection_string(connection_string: &str) -> String {
    match connection_string.rsplit_once('@') {
        Some((_, host)) => format!("postgresql://***@{host}"),
        None => connection_string
            .split_once("://")
            .map(|(_, rest)| format!("postgresql://{rest}"))
            .unwrap_or_else(|| "postgresql://***".to_string()),
    }
}
