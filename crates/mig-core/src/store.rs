//! Record store seam
//!
//! The pipeline reads the legacy system and writes the modern one only through
//! [`RecordStore`] (and [`ModernStore`] for the target). [`InMemoryStore`] backs
//! both sides in-process; a durable store can be substituted without touching
//! orchestration logic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// One row: an open key/value mapping
pub type Record = serde_json::Map<String, Value>;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Table does not exist
    #[error("table {schema}.{table} does not exist")]
    TableNotFound {
        /// Schema name
        schema: String,
        /// Table name
        table: String,
    },

    /// Backend failure
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Column data types across legacy and modern stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    /// Fixed-width, space-padded text
    Char,
    /// Variable-width text
    Varchar,
    /// 32-bit integer
    Integer,
    /// 16-bit integer
    Smallint,
    /// 64-bit integer
    Bigint,
    /// Fixed-point decimal
    Decimal,
    /// Calendar date
    Date,
    /// Date and time
    Timestamp,
    /// Unbounded text
    Text,
    /// Arbitrary-precision number
    Numeric,
    /// Boolean
    Boolean,
    /// JSON text
    Json,
    /// Binary JSON
    Jsonb,
}

impl ColumnType {
    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Char => "CHAR",
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Integer => "INTEGER",
            ColumnType::Smallint => "SMALLINT",
            ColumnType::Bigint => "BIGINT",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Date => "DATE",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Text => "TEXT",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Json => "JSON",
            ColumnType::Jsonb => "JSONB",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: ColumnType,
    /// Declared length for text types
    pub length: Option<u32>,
    /// Declared precision for decimals
    pub precision: Option<u32>,
    /// Declared scale for decimals
    pub scale: Option<u32>,
    /// Whether NULL is allowed
    pub nullable: bool,
    /// Default value
    pub default_value: Option<Value>,
}

impl ColumnDef {
    /// Create nullable column
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            default_value: None,
        }
    }

    /// With length
    #[inline]
    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// With precision and scale
    #[inline]
    #[must_use]
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Mark NOT NULL
    #[inline]
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Table definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Schema name
    pub schema: String,
    /// Table name
    pub table_name: String,
    /// Columns in declaration order
    pub columns: Vec<ColumnDef>,
    /// Primary key columns
    pub primary_key: Vec<String>,
    /// Index names
    pub indexes: Vec<String>,
}

impl TableSchema {
    /// Create table without columns
    #[inline]
    #[must_use]
    pub fn new(schema: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table_name: table_name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Append a column
    #[inline]
    #[must_use]
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Set primary key columns
    #[must_use]
    pub fn with_primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// `schema.table`
    #[inline]
    #[must_use]
    pub fn key(&self) -> String {
        table_key(&self.schema, &self.table_name)
    }
}

fn table_key(schema: &str, table: &str) -> String {
    format!("{schema}.{table}")
}

/// Summary of a modern environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentStatus {
    /// Environment label
    pub environment_type: String,
    /// When the summary was taken
    pub timestamp: DateTime<Utc>,
    /// Table count
    pub tables: usize,
    /// Row count across tables
    pub total_records: usize,
}

/// Four-operation record store, plus table enumeration for analysis
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create (or recreate, emptying) a table
    async fn create_table(&self, table: TableSchema) -> Result<(), StoreError>;

    /// Append rows, returning how many were written
    ///
    /// # Errors
    /// `StoreError::TableNotFound` for an unknown table.
    async fn insert(&self, schema: &str, table: &str, records: Vec<Record>) -> Result<usize, StoreError>;

    /// Rows matching every `filter` entry; all rows without a filter; empty for
    /// an unknown table
    async fn select(&self, schema: &str, table: &str, filter: Option<&Record>) -> Result<Vec<Record>, StoreError>;

    /// Row count; 0 for an unknown table
    async fn count(&self, schema: &str, table: &str) -> Result<usize, StoreError>;

    /// Table definitions, ordered by key
    async fn tables(&self) -> Result<Vec<TableSchema>, StoreError>;
}

/// Target-side store
#[async_trait]
pub trait ModernStore: RecordStore {
    /// Environment summary
    async fn environment_status(&self) -> Result<EnvironmentStatus, StoreError>;
}

#[derive(Debug, Default)]
struct StoreInner {
    tables: BTreeMap<String, TableSchema>,
    data: BTreeMap<String, Vec<Record>>,
}

/// In-process store for either side of a migration
#[derive(Debug)]
pub struct InMemoryStore {
    environment_type: String,
    inner: RwLock<StoreInner>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new("in_memory")
    }
}

impl InMemoryStore {
    /// Create empty store with an environment label
    #[inline]
    #[must_use]
    pub fn new(environment_type: impl Into<String>) -> Self {
        Self {
            environment_type: environment_type.into(),
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Store labelled as the legacy side
    #[inline]
    #[must_use]
    pub fn legacy() -> Self {
        Self::new("legacy_mainframe")
    }

    /// Store labelled as the modern side
    #[inline]
    #[must_use]
    pub fn modern() -> Self {
        Self::new("cloud_native")
    }

    /// Environment label
    #[inline]
    #[must_use]
    pub fn environment_type(&self) -> &str {
        &self.environment_type
    }

    /// Table definition by name
    #[must_use]
    pub fn table(&self, schema: &str, table: &str) -> Option<TableSchema> {
        self.inner.read().tables.get(&table_key(schema, table)).cloned()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn create_table(&self, table: TableSchema) -> Result<(), StoreError> {
        let key = table.key();
        tracing::debug!(env = %self.environment_type, table = %key, "table created");
        let mut inner = self.inner.write();
        inner.data.insert(key.clone(), Vec::new());
        inner.tables.insert(key, table);
        Ok(())
    }

    async fn insert(&self, schema: &str, table: &str, records: Vec<Record>) -> Result<usize, StoreError> {
        let key = table_key(schema, table);
        let mut inner = self.inner.write();
        let rows = inner.data.get_mut(&key).ok_or_else(|| StoreError::TableNotFound {
            schema: schema.to_string(),
            table: table.to_string(),
        })?;
        let n = records.len();
        rows.extend(records);
        tracing::debug!(env = %self.environment_type, table = %key, count = n, "rows inserted");
        Ok(n)
    }

    async fn select(&self, schema: &str, table: &str, filter: Option<&Record>) -> Result<Vec<Record>, StoreError> {
        let inner = self.inner.read();
        let Some(rows) = inner.data.get(&table_key(schema, table)) else {
            return Ok(Vec::new());
        };
        Ok(match filter {
            Some(f) if !f.is_empty() => rows
                .iter()
                .filter(|r| f.iter().all(|(k, v)| r.get(k) == Some(v)))
                .cloned()
                .collect(),
            _ => rows.clone(),
        })
    }

    async fn count(&self, schema: &str, table: &str) -> Result<usize, StoreError> {
        Ok(self.inner.read().data.get(&table_key(schema, table)).map_or(0, Vec::len))
    }

    async fn tables(&self) -> Result<Vec<TableSchema>, StoreError> {
        Ok(self.inner.read().tables.values().cloned().collect())
    }
}

#[async_trait]
impl ModernStore for InMemoryStore {
    async fn environment_status(&self) -> Result<EnvironmentStatus, StoreError> {
        let inner = self.inner.read();
        Ok(EnvironmentStatus {
            environment_type: self.environment_type.clone(),
            timestamp: Utc::now(),
            tables: inner.tables.len(),
            total_records: inner.data.values().map(Vec::len).sum(),
        })
    }
}
