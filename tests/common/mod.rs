//! Shared fixtures for integration tests
//!
//! [`MemoryDatabase`] answers queries from canned rows keyed by SQL text and
//! parameter. [`Workspace`] lays out output and intake directories in a
//! temporary directory.

#![allow(dead_code)]

use async_trait::async_trait;
use dcexport::adapters::database::Database;
use dcexport::config::{
    secret_string, ApplicationConfig, DatabaseConfig, DcExportConfig, ExportConfig, LoggingConfig,
};
use dcexport::core::export::{ExportCoordinator, ExportSummary};
use dcexport::domain::{DcExportError, Result, Row};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::watch;

/// In-memory publications database
#[derive(Default)]
pub struct MemoryDatabase {
    results: HashMap<(String, Option<i64>), Vec<Row>>,
    failing: HashSet<String>,
    executed: Mutex<Vec<(String, Option<i64>)>>,
    closed: AtomicBool,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned for `sql` bound to `param`
    pub fn with_rows(mut self, sql: &str, param: Option<i64>, rows: Vec<Row>) -> Self {
        self.results
            .entry((sql.to_string(), param))
            .or_default()
            .extend(rows);
        self
    }

    /// Makes every execution of `sql` fail
    pub fn failing(mut self, sql: &str) -> Self {
        self.failing.insert(sql.to_string());
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Statements executed so far, in order
    pub fn executed(&self) -> Vec<(String, Option<i64>)> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn query(&self, sql: &str, param: Option<i64>) -> Result<Vec<Row>> {
        self.executed
            .lock()
            .unwrap()
            .push((sql.to_string(), param));

        if self.failing.contains(sql) {
            return Err(DcExportError::Database(
                "relation does not exist".to_string(),
            ));
        }

        Ok(self
            .results
            .get(&(sql.to_string(), param))
            .cloned()
            .unwrap_or_default())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A row of the main publications query
pub fn publication(pub_id: i64, title: &str, year: &str, pub_file: &str) -> Row {
    Row::new()
        .with("pub_id", pub_id)
        .with("title", title)
        .with("abstract", "")
        .with("year", year)
        .with("pub_file", pub_file)
}

pub fn author(fname: &str, lname: &str) -> Row {
    Row::new().with("fname", fname).with("lname", lname)
}

pub fn named(name: &str) -> Row {
    Row::new().with("name", name)
}

/// Temporary output and intake directories
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("pdfs")).unwrap();
        Self { root }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("import")
    }

    pub fn intake_dir(&self) -> PathBuf {
        self.root.path().join("pdfs")
    }

    /// Places a PDF in the intake directory
    pub fn add_pdf(&self, name: &str, content: &[u8]) {
        fs::write(self.intake_dir().join(name), content).unwrap();
    }

    pub fn item_dir(&self, folder: &str) -> PathBuf {
        self.output_dir().join(folder)
    }

    pub fn read_item(&self, folder: &str, file: &str) -> String {
        fs::read_to_string(self.item_dir(folder).join(file)).unwrap()
    }

    /// Names of the entries in the output directory, sorted
    pub fn output_entries(&self) -> Vec<String> {
        sorted_entries(&self.output_dir())
    }

    /// Names of the files in one item folder, sorted
    pub fn item_entries(&self, folder: &str) -> Vec<String> {
        sorted_entries(&self.item_dir(folder))
    }

    pub fn config(&self, folder_digits: usize, dry_run: bool) -> DcExportConfig {
        DcExportConfig {
            application: ApplicationConfig::default(),
            database: DatabaseConfig {
                connection_string: secret_string("postgresql://localhost/pubs".to_string()),
                connect_timeout_seconds: 30,
                statement_timeout_seconds: 60,
                ssl_mode: "disable".to_string(),
            },
            export: ExportConfig {
                output_dir: self.output_dir().to_string_lossy().to_string(),
                intake_dir: self.intake_dir().to_string_lossy().to_string(),
                folder_digits,
                dry_run,
            },
            logging: LoggingConfig::default(),
        }
    }
}

fn sorted_entries(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Runs one export against `database`
pub async fn run_export(
    config: DcExportConfig,
    database: Arc<MemoryDatabase>,
) -> Result<ExportSummary> {
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    ExportCoordinator::new(config, database, shutdown_rx)
        .execute_export()
        .await
}
