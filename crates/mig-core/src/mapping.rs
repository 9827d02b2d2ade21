//! Schema mapping and analysis
//!
//! [`SchemaMapper`] maps legacy tables 1:1 onto modern ones (type coercion,
//! lower-cased names) and transforms rows to match. [`SchemaAnalyzer`] scores a
//! legacy schema and flags normalization candidates.

use crate::store::{ColumnDef, ColumnType, Record, TableSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Scale used when a decimal column declares none
const DEFAULT_DECIMAL_SCALE: u32 = 2;
/// Tables wider than this are flagged
const HIGH_COLUMN_COUNT: usize = 50;
/// CHAR columns longer than this are flagged
const WIDE_CHAR_LENGTH: u32 = 20;

/// Maps legacy tables and rows onto the modern store
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaMapper;

impl SchemaMapper {
    /// Create new mapper
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Target type for a legacy column type; types outside the legacy set map to TEXT
    #[must_use]
    pub fn map_type(&self, source: ColumnType) -> ColumnType {
        match source {
            ColumnType::Char | ColumnType::Varchar => ColumnType::Varchar,
            ColumnType::Integer | ColumnType::Smallint => ColumnType::Integer,
            ColumnType::Bigint => ColumnType::Bigint,
            ColumnType::Decimal => ColumnType::Decimal,
            ColumnType::Date => ColumnType::Date,
            ColumnType::Timestamp => ColumnType::Timestamp,
            _ => ColumnType::Text,
        }
    }

    /// Map a legacy table definition
    #[must_use]
    pub fn map_table(&self, source: &TableSchema) -> TableSchema {
        let target = TableSchema {
            schema: source.schema.to_lowercase(),
            table_name: source.table_name.to_lowercase(),
            columns: source
                .columns
                .iter()
                .map(|c| ColumnDef {
                    name: c.name.to_lowercase(),
                    data_type: self.map_type(c.data_type),
                    ..c.clone()
                })
                .collect(),
            primary_key: source.primary_key.iter().map(|k| k.to_lowercase()).collect(),
            indexes: source.indexes.clone(),
        };
        tracing::debug!(source = %source.key(), target = %target.key(), "table mapped");
        target
    }

    /// Transform one legacy row for the target table
    ///
    /// Columns are paired positionally. CHAR strings are right-trimmed, DECIMAL
    /// values rounded to the source scale (default 2); missing values become null.
    #[must_use]
    pub fn transform_record(&self, record: &Record, source: &TableSchema, target: &TableSchema) -> Record {
        source
            .columns
            .iter()
            .zip(&target.columns)
            .map(|(src, dst)| {
                let value = record.get(&src.name).cloned().unwrap_or(Value::Null);
                (dst.name.clone(), transform_value(value, src))
            })
            .collect()
    }
}

fn transform_value(value: Value, column: &ColumnDef) -> Value {
    match (column.data_type, value) {
        (ColumnType::Char, Value::String(s)) => Value::String(s.trim_end().to_string()),
        (ColumnType::Decimal, Value::Number(n)) => match n.as_f64() {
            Some(f) => round_decimal(f, column.scale.unwrap_or(DEFAULT_DECIMAL_SCALE))
                .unwrap_or(Value::Number(n)),
            None => Value::Number(n),
        },
        (ColumnType::Decimal, Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(f) => round_decimal(f, column.scale.unwrap_or(DEFAULT_DECIMAL_SCALE)).unwrap_or(Value::String(s)),
            Err(_) => Value::String(s),
        },
        (_, v) => v,
    }
}

fn round_decimal(value: f64, scale: u32) -> Option<Value> {
    let factor = 10f64.powi(i32::try_from(scale).ok()?);
    Number::from_f64((value * factor).round() / factor).map(Value::Number)
}

/// Kind of schema finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaIssue {
    /// More than 50 columns
    HighColumnCount,
    /// CHAR wider than 20
    InefficientCharUsage,
}

/// One schema finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRecommendation {
    /// `schema.table`
    pub table: String,
    /// Column, for column-level findings
    pub column: Option<String>,
    /// Finding kind
    pub issue: SchemaIssue,
    /// Suggested change
    pub suggestion: String,
}

/// Schema analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaAnalysis {
    /// Table count
    pub total_tables: usize,
    /// Column count across tables
    pub total_columns: usize,
    /// `tables + 0.1 * columns + 2 * recommendations`
    pub complexity_score: f64,
    /// Findings
    pub recommendations: Vec<SchemaRecommendation>,
}

/// Scores legacy schemas
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaAnalyzer;

impl SchemaAnalyzer {
    /// Create new analyzer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Analyze a set of legacy tables
    #[must_use]
    pub fn analyze(&self, tables: &[TableSchema]) -> SchemaAnalysis {
        let total_columns = tables.iter().map(|t| t.columns.len()).sum();
        let mut recommendations = Vec::new();

        for table in tables {
            if table.columns.len() > HIGH_COLUMN_COUNT {
                recommendations.push(SchemaRecommendation {
                    table: table.key(),
                    column: None,
                    issue: SchemaIssue::HighColumnCount,
                    suggestion: "Consider normalizing into multiple tables".to_string(),
                });
            }
            for col in &table.columns {
                match (col.data_type, col.length) {
                    (ColumnType::Char, Some(len)) if len > WIDE_CHAR_LENGTH => {
                        recommendations.push(SchemaRecommendation {
                            table: table.key(),
                            column: Some(col.name.clone()),
                            issue: SchemaIssue::InefficientCharUsage,
                            suggestion: format!("Convert CHAR({len}) to VARCHAR for better space efficiency"),
                        });
                    }
                    _ => {}
                }
            }
        }

        let complexity_score =
            tables.len() as f64 + total_columns as f64 * 0.1 + recommendations.len() as f64 * 2.0;
        tracing::info!(complexity_score, tables = tables.len(), "schema analysis completed");

        SchemaAnalysis {
            total_tables: tables.len(),
            total_columns,
            complexity_score,
            recommendations,
        }
    }
}
