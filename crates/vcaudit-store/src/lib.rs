//! Audit trail of valuation runs.
//!
//! Each run is stored as its full JSON payload plus a few summary columns
//! for listing. The store only relies on the serialized result shape, so it
//! has no dependency on the valuation engine itself.

pub mod migrations;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use ::duckdb::{Connection, ToSql};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_LIST_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid run payload: {0}")]
    InvalidPayload(String),

    #[error("run '{0}' is already stored")]
    DuplicateRun(String),

    #[error("stored payload is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub home: PathBuf,
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_home(resolve_vcaudit_home())
    }
}

impl StoreConfig {
    pub fn in_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let db_path = home.join("runs.duckdb");
        Self { home, db_path }
    }

    /// Config for an explicit database file; its parent acts as home.
    pub fn at_path(db_path: impl Into<PathBuf>) -> Self {
        let db_path = db_path.into();
        let home = db_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { home, db_path }
    }
}

/// Listing row for a stored run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub request_id: String,
    pub company_name: String,
    pub methodology: String,
    pub as_of_date: String,
    pub fair_value: f64,
    pub generated_at_utc: String,
}

impl RunSummary {
    fn from_payload(payload: &Value) -> Result<Self, StoreError> {
        Ok(Self {
            request_id: text_at(payload, "/audit_metadata/request_id")?,
            company_name: text_at(payload, "/valuation_result/company_name")?,
            methodology: text_at(payload, "/valuation_result/methodology")?,
            as_of_date: text_at(payload, "/valuation_result/as_of_date")?,
            fair_value: payload
                .pointer("/valuation_result/estimated_fair_value/amount")
                .and_then(Value::as_f64)
                .ok_or_else(|| missing("/valuation_result/estimated_fair_value/amount"))?,
            generated_at_utc: text_at(payload, "/audit_metadata/generated_at_utc")?,
        })
    }
}

pub struct RunStore {
    config: StoreConfig,
    connection: Mutex<Connection>,
}

impl RunStore {
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(StoreConfig::default())
    }

    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let connection = Connection::open(&config.db_path)?;
        Self::initialize(config, connection)
    }

    /// Store backed by a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::initialize(
            StoreConfig::at_path(":memory:"),
            Connection::open_in_memory()?,
        )
    }

    fn initialize(config: StoreConfig, connection: Connection) -> Result<Self, StoreError> {
        connection.execute_batch("PRAGMA disable_progress_bar;")?;
        migrations::apply_migrations(&connection)?;
        tracing::debug!(path = %config.db_path.display(), "run store ready");
        Ok(Self {
            config,
            connection: Mutex::new(connection),
        })
    }

    pub fn db_path(&self) -> &Path {
        self.config.db_path.as_path()
    }

    /// Persist a serialized valuation result and return its request id.
    pub fn save(&self, payload: &Value) -> Result<String, StoreError> {
        let summary = RunSummary::from_payload(payload)?;
        let text = serde_json::to_string(payload)?;

        let connection = self.lock();
        let id_param: [&dyn ToSql; 1] = [&summary.request_id];
        let existing: i64 = connection.query_row(
            "SELECT COUNT(*) FROM runs WHERE request_id = ?",
            id_param.as_slice(),
            |row| row.get(0),
        )?;
        if existing > 0 {
            return Err(StoreError::DuplicateRun(summary.request_id));
        }

        let params: [&dyn ToSql; 7] = [
            &summary.request_id,
            &summary.company_name,
            &summary.methodology,
            &summary.as_of_date,
            &summary.fair_value,
            &summary.generated_at_utc,
            &text,
        ];
        connection.execute(
            "INSERT INTO runs \
             (request_id, company_name, methodology, as_of_date, fair_value, generated_at_utc, payload) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params.as_slice(),
        )?;

        tracing::info!(
            request_id = %summary.request_id,
            company = %summary.company_name,
            "run stored"
        );
        Ok(summary.request_id)
    }

    /// Most recently stored runs first.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<RunSummary>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let connection = self.lock();
        let mut statement = connection.prepare(
            "SELECT request_id, company_name, methodology, as_of_date, fair_value, generated_at_utc \
             FROM runs ORDER BY seq DESC LIMIT ?",
        )?;
        let params: [&dyn ToSql; 1] = [&limit];
        let rows = statement
            .query_map(params.as_slice(), |row| {
                Ok(RunSummary {
                    request_id: row.get(0)?,
                    company_name: row.get(1)?,
                    methodology: row.get(2)?,
                    as_of_date: row.get(3)?,
                    fair_value: row.get(4)?,
                    generated_at_utc: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get(&self, request_id: &str) -> Result<Option<Value>, StoreError> {
        let connection = self.lock();
        let mut statement = connection.prepare("SELECT payload FROM runs WHERE request_id = ?")?;
        let params: [&dyn ToSql; 1] = [&request_id];
        let mut rows = statement.query(params.as_slice())?;

        let text: Option<String> = match rows.next()? {
            Some(row) => Some(row.get(0)?),
            None => None,
        };
        text.map(|text| serde_json::from_str(&text))
            .transpose()
            .map_err(StoreError::from)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let connection = self.lock();
        let count: i64 = connection.query_row("SELECT COUNT(*) FROM runs", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RunStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunStore")
            .field("db_path", &self.config.db_path)
            .finish()
    }
}

fn text_at(payload: &Value, pointer: &str) -> Result<String, StoreError> {
    payload
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| missing(pointer))
}

fn missing(pointer: &str) -> StoreError {
    StoreError::InvalidPayload(format!("missing or mistyped '{pointer}'"))
}

fn resolve_vcaudit_home() -> PathBuf {
    if let Some(path) = env::var_os("VCAUDIT_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".vcaudit");
    }

    PathBuf::from(".vcaudit")
}
