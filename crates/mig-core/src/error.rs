//! Error types for the migration core
//!
//! Every failure crossing the public API is a [`MigrationError`]:
//! - Unknown customer, channel, plan, cutover or table ids
//! - Operations whose status precondition is unmet
//! - Store, consensus, configuration and risk model failures
//!
//! [`MigrationError::context`] renders the structured form (kind, message,
//! key/value context) used at API boundaries.

use crate::store::StoreError;
use mig_risk::RiskError;
use serde::Serialize;
use std::fmt;

/// Kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    /// Customer
    Customer,
    /// Integration channel
    Channel,
    /// Migration plan
    Plan,
    /// Cutover
    Cutover,
    /// Store table
    Table,
}

impl Entity {
    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Customer => "customer",
            Entity::Channel => "channel",
            Entity::Plan => "plan",
            Entity::Cutover => "cutover",
            Entity::Table => "table",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main migration error type
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Unknown id
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind
        entity: Entity,
        /// Id that was looked up
        id: String,
    },

    /// Status precondition unmet
    #[error("cannot {operation} {entity} {id}: current status is {current}")]
    InvalidState {
        /// Entity kind
        entity: Entity,
        /// Entity id
        id: String,
        /// Status at the time of the call
        current: String,
        /// Attempted operation
        operation: &'static str,
    },

    /// Record store failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Consensus gate rejected a decision
    #[error("consensus not reached: {0}")]
    Consensus(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Risk model error
    #[error("risk model error: {0}")]
    Risk(#[from] RiskError),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl MigrationError {
    /// Create not-found error
    #[inline]
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create invalid-state error
    #[inline]
    pub fn invalid_state(
        entity: Entity,
        id: impl Into<String>,
        current: impl fmt::Display,
        operation: &'static str,
    ) -> Self {
        Self::InvalidState {
            entity,
            id: id.into(),
            current: current.to_string(),
            operation,
        }
    }

    /// Error classification
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::Store(StoreError::TableNotFound { .. }) => ErrorKind::NotFound,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Consensus(_) | Self::Config(_) | Self::Risk(_) => ErrorKind::Validation,
            Self::Store(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status an API adapter should answer with
    #[inline]
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }

    /// Structured form: kind, message and key/value context
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        let ctx = ErrorContext::new(self.kind(), self.to_string());
        match self {
            Self::NotFound { entity, id } => ctx.add("entity", entity.as_str()).add("id", id),
            Self::InvalidState {
                entity,
                id,
                current,
                operation,
            } => ctx
                .add("entity", entity.as_str())
                .add("id", id)
                .add("current_status", current)
                .add("operation", *operation),
            Self::Store(StoreError::TableNotFound { schema, table }) => {
                ctx.add("entity", Entity::Table.as_str()).add("id", format!("{schema}.{table}"))
            }
            _ => ctx,
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown id
    NotFound,
    /// Status precondition unmet
    InvalidState,
    /// Input or configuration rejected
    Validation,
    /// Unexpected failure
    Internal,
}

impl ErrorKind {
    /// HTTP status for this kind
    #[inline]
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::InvalidState | ErrorKind::Validation => 400,
            ErrorKind::Internal => 500,
        }
    }
}

/// Structured error for API and CLI boundaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorContext {
    /// Classification
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Key-value context pairs
    pub entries: Vec<(String, String)>,
}

impl ErrorContext {
    /// Create context without entries
    #[inline]
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            entries: Vec::new(),
        }
    }

    /// Add context entry
    #[inline]
    #[must_use]
    pub fn add(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Look up a context value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Result alias for the migration core
pub type Result<T, E = MigrationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use mig_model::MigrationStatus;

    #[test]
    fn not_found_message_and_status() {
        let err = MigrationError::not_found(Entity::Plan, "UNKNOWN");
        assert_eq!(err.to_string(), "plan UNKNOWN not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.http_status(), 404);
        assert_eq!(err.context().get("id"), Some("UNKNOWN"));
    }

    #[test]
    fn invalid_state_carries_current_status() {
        let err = MigrationError::invalid_state(Entity::Plan, "PLAN-1", MigrationStatus::Planning, "execute");
        assert_eq!(err.http_status(), 400);
        assert!(err.to_string().contains("planning"));
        let ctx = err.context();
        assert_eq!(ctx.get("current_status"), Some("planning"));
        assert_eq!(ctx.get("operation"), Some("execute"));
    }

    #[test]
    fn other_kinds() {
        assert_eq!(MigrationError::Internal("boom".into()).http_status(), 500);
        assert_eq!(MigrationError::Config("bad".into()).kind(), ErrorKind::Validation);
        let missing = MigrationError::from(StoreError::TableNotFound {
            schema: "s".into(),
            table: "t".into(),
        });
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(missing.context().get("id"), Some("s.t"));
    }
}
