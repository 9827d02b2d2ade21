//! Whole-system data migration pipeline
//!
//! Runs the fixed phase sequence against a legacy [`RecordStore`] and a
//! [`ModernStore`]:
//!
//! ```text
//! risk_assessment → analysis → schema_mapping → data_migration → validation
//! ```
//!
//! Phases run as one sequential `await` chain, yielding to the runtime between
//! phases. A phase error stops the chain; it is recorded in the result, which
//! keeps every earlier phase report.

use crate::config::PipelineConfig;
use crate::consensus::{AgentRole, ConsensusCoordinator, ConsensusOutcome, Decision, DecisionKind, Participant, VoteProvider};
use crate::error::{MigrationError, Result};
use crate::mapping::{SchemaAnalysis, SchemaAnalyzer, SchemaMapper};
use crate::store::{EnvironmentStatus, ModernStore, Record, RecordStore, TableSchema};
use chrono::{DateTime, Utc};
use mig_model::MigrationStatus;
use mig_risk::{MigrationProfile, MigrationRiskEngine, SystemRiskAssessment};
use mig_simulation::canonical_json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// Pipeline phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationPhase {
    /// Whole-system risk scoring
    RiskAssessment,
    /// Legacy schema analysis
    Analysis,
    /// Target table creation
    SchemaMapping,
    /// Row transfer
    DataMigration,
    /// Source/target comparison
    Validation,
}

impl MigrationPhase {
    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationPhase::RiskAssessment => "risk_assessment",
            MigrationPhase::Analysis => "analysis",
            MigrationPhase::SchemaMapping => "schema_mapping",
            MigrationPhase::DataMigration => "data_migration",
            MigrationPhase::Validation => "validation",
        }
    }
}

impl fmt::Display for MigrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    /// Phase succeeded
    Completed,
    /// Phase ran but found problems
    Failed,
}

/// Legacy to modern table pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMapping {
    /// `schema.table` in the legacy store
    pub source: String,
    /// `schema.table` in the modern store
    pub target: String,
}

/// Validation of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableValidation {
    /// Legacy `schema.table`
    pub table: String,
    /// Legacy row count
    pub source_count: usize,
    /// Modern row count
    pub target_count: usize,
    /// Counts agree
    pub count_matched: bool,
    /// Transformed legacy rows equal modern rows as a multiset
    pub content_matched: bool,
}

impl TableValidation {
    /// Counts and content agree
    #[inline]
    #[must_use]
    pub fn matched(&self) -> bool {
        self.count_matched && self.content_matched
    }
}

/// Phase-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseDetails {
    /// Risk phase
    Risk {
        /// System assessment
        assessment: SystemRiskAssessment,
    },
    /// Analysis phase
    Analysis {
        /// Schema analysis of the legacy tables
        schema_analysis: SchemaAnalysis,
    },
    /// Mapping phase
    Mapping {
        /// Tables created in the modern store
        mappings: Vec<TableMapping>,
    },
    /// Migration phase
    Migration {
        /// Rows inserted into the modern store
        records_migrated: usize,
        /// Workflow label
        workflow: String,
        /// Consensus tally, when a gate is configured
        consensus: Option<ConsensusOutcome>,
    },
    /// Validation phase
    Validation {
        /// Per-table checks
        validations: Vec<TableValidation>,
        /// Modern environment after loading
        target_environment: EnvironmentStatus,
    },
}

/// Report of one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    /// Phase
    pub phase: MigrationPhase,
    /// Outcome
    pub status: PhaseStatus,
    /// Completion time
    pub timestamp: DateTime<Utc>,
    /// Phase payload
    pub details: PhaseDetails,
}

impl PhaseReport {
    fn new(phase: MigrationPhase, status: PhaseStatus, details: PhaseDetails) -> Self {
        Self {
            phase,
            status,
            timestamp: Utc::now(),
            details,
        }
    }
}

/// Result of [`MigrationPipeline::run_migration`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationRunResult {
    /// Source system label
    pub source: String,
    /// Target system label
    pub target: String,
    /// Workflow label
    pub workflow: String,
    /// `in_progress` while running, then `completed` or `failed`
    pub status: MigrationStatus,
    /// Start time
    pub started_at: DateTime<Utc>,
    /// End time
    pub completed_at: Option<DateTime<Utc>>,
    /// Wall-clock seconds
    pub duration_secs: Option<f64>,
    /// Rows inserted into the modern store
    pub records_migrated: usize,
    /// Reports of every phase that ran, in order
    pub phases: Vec<PhaseReport>,
    /// Errors that failed the run
    pub errors: Vec<String>,
}

impl MigrationRunResult {
    /// Report of a phase, if it ran
    #[must_use]
    pub fn phase(&self, phase: MigrationPhase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    fn finish(&mut self, status: MigrationStatus) {
        let now = Utc::now();
        self.status = status;
        self.completed_at = Some(now);
        self.duration_secs = Some((now - self.started_at).num_milliseconds() as f64 / 1000.0);
    }
}

/// Participants voting on data migration when a vote provider is supplied
fn default_participants() -> [Participant; 4] {
    [
        Participant::new("analyzer_1", AgentRole::DataAnalyzer),
        Participant::new("mapper_1", AgentRole::SchemaMapper),
        Participant::new("migrator_1", AgentRole::DataMigrator),
        Participant::new("validator_1", AgentRole::Validator),
    ]
}

/// Moves every legacy table into the modern store
pub struct MigrationPipeline {
    legacy: Arc<dyn RecordStore>,
    modern: Arc<dyn ModernStore>,
    mapper: SchemaMapper,
    analyzer: SchemaAnalyzer,
    risk: MigrationRiskEngine,
    config: PipelineConfig,
    consensus: Option<ConsensusCoordinator>,
}

impl fmt::Debug for MigrationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationPipeline")
            .field("config", &self.config)
            .field("consensus", &self.consensus)
            .finish_non_exhaustive()
    }
}

impl MigrationPipeline {
    /// Create pipeline over two stores, without a consensus gate
    #[must_use]
    pub fn new(legacy: Arc<dyn RecordStore>, modern: Arc<dyn ModernStore>) -> Self {
        Self {
            legacy,
            modern,
            mapper: SchemaMapper::new(),
            analyzer: SchemaAnalyzer::new(),
            risk: MigrationRiskEngine::new(),
            config: PipelineConfig::default(),
            consensus: None,
        }
    }

    /// With pipeline settings; also retunes an existing consensus gate
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.consensus = self
            .consensus
            .map(|c| c.with_threshold(config.consensus_threshold));
        self.config = config;
        self
    }

    /// Gate data migration on a consensus of the given coordinator
    #[inline]
    #[must_use]
    pub fn with_consensus(mut self, coordinator: ConsensusCoordinator) -> Self {
        self.consensus = Some(coordinator);
        self
    }

    /// Gate data migration on votes from `provider`, cast by the standard
    /// analyzer, mapper, migrator and validator participants
    #[must_use]
    pub fn with_vote_provider(self, provider: Arc<dyn VoteProvider>) -> Self {
        let threshold = self.config.consensus_threshold;
        let coordinator = default_participants()
            .into_iter()
            .fold(ConsensusCoordinator::new(provider).with_threshold(threshold), |c, p| {
                c.with_participant(p)
            });
        self.with_consensus(coordinator)
    }

    /// Pipeline settings
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every phase and report
    ///
    /// Never fails: errors are recorded in the result with status `failed`.
    pub async fn run_migration(
        &self,
        source: &str,
        target: &str,
        workflow: &str,
        profile: &MigrationProfile,
    ) -> MigrationRunResult {
        tracing::info!(source, target, workflow, "starting migration");

        let mut result = MigrationRunResult {
            source: source.to_string(),
            target: target.to_string(),
            workflow: workflow.to_string(),
            status: MigrationStatus::InProgress,
            started_at: Utc::now(),
            completed_at: None,
            duration_secs: None,
            records_migrated: 0,
            phases: Vec::new(),
            errors: Vec::new(),
        };

        match self.run_phases(workflow, profile, &mut result).await {
            Ok(()) => {
                let failed_validation = result
                    .phase(MigrationPhase::Validation)
                    .is_some_and(|p| p.status == PhaseStatus::Failed);
                if failed_validation && self.config.fail_on_validation_mismatch {
                    result.errors.push(validation_error(&result));
                    result.finish(MigrationStatus::Failed);
                    tracing::error!(errors = ?result.errors, "migration failed validation");
                } else {
                    if failed_validation {
                        tracing::warn!("validation mismatch ignored by configuration");
                    }
                    result.finish(MigrationStatus::Completed);
                    tracing::info!(
                        duration_secs = result.duration_secs,
                        records = result.records_migrated,
                        "migration completed"
                    );
                }
            }
            Err(e) => {
                result.errors.push(e.to_string());
                result.finish(MigrationStatus::Failed);
                tracing::error!(error = %e, "migration failed");
            }
        }
        result
    }

    async fn run_phases(
        &self,
        workflow: &str,
        profile: &MigrationProfile,
        result: &mut MigrationRunResult,
    ) -> Result<()> {
        tracing::info!(phase = %MigrationPhase::RiskAssessment, "executing phase");
        let assessment = self.risk.assess(profile);
        result.phases.push(PhaseReport::new(
            MigrationPhase::RiskAssessment,
            PhaseStatus::Completed,
            PhaseDetails::Risk { assessment },
        ));
        tokio::task::yield_now().await;

        tracing::info!(phase = %MigrationPhase::Analysis, "executing phase");
        let tables = self.legacy.tables().await?;
        let schema_analysis = self.analyzer.analyze(&tables);
        result.phases.push(PhaseReport::new(
            MigrationPhase::Analysis,
            PhaseStatus::Completed,
            PhaseDetails::Analysis { schema_analysis },
        ));
        tokio::task::yield_now().await;

        tracing::info!(phase = %MigrationPhase::SchemaMapping, "executing phase");
        let pairs = self.map_tables(tables).await?;
        let mappings = pairs
            .iter()
            .map(|(src, dst)| TableMapping {
                source: src.key(),
                target: dst.key(),
            })
            .collect();
        result.phases.push(PhaseReport::new(
            MigrationPhase::SchemaMapping,
            PhaseStatus::Completed,
            PhaseDetails::Mapping { mappings },
        ));
        tokio::task::yield_now().await;

        tracing::info!(phase = %MigrationPhase::DataMigration, workflow, "executing phase");
        let consensus = self.consensus_gate(workflow, pairs.len()).await?;
        let records_migrated = self.migrate_rows(&pairs).await?;
        result.records_migrated = records_migrated;
        result.phases.push(PhaseReport::new(
            MigrationPhase::DataMigration,
            PhaseStatus::Completed,
            PhaseDetails::Migration {
                records_migrated,
                workflow: workflow.to_string(),
                consensus,
            },
        ));
        tokio::task::yield_now().await;

        tracing::info!(phase = %MigrationPhase::Validation, "executing phase");
        let validations = self.validate(&pairs).await?;
        let status = if validations.iter().all(TableValidation::matched) {
            PhaseStatus::Completed
        } else {
            PhaseStatus::Failed
        };
        let target_environment = self.modern.environment_status().await?;
        result.phases.push(PhaseReport::new(
            MigrationPhase::Validation,
            status,
            PhaseDetails::Validation {
                validations,
                target_environment,
            },
        ));
        Ok(())
    }

    async fn map_tables(&self, tables: Vec<TableSchema>) -> Result<Vec<(TableSchema, TableSchema)>> {
        let mut pairs = Vec::with_capacity(tables.len());
        for source in tables {
            let target = self.mapper.map_table(&source);
            self.modern.create_table(target.clone()).await?;
            pairs.push((source, target));
        }
        Ok(pairs)
    }

    async fn consensus_gate(&self, workflow: &str, tables: usize) -> Result<Option<ConsensusOutcome>> {
        let Some(coordinator) = &self.consensus else {
            return Ok(None);
        };
        let decision = Decision::new(DecisionKind::DataMigration)
            .with_details(json!({ "workflow": workflow, "tables": tables }));
        let outcome = coordinator.decide(&decision).await;
        if !outcome.approved {
            return Err(MigrationError::Consensus(format!(
                "data migration rejected (approval rate {:.2})",
                outcome.approval_rate
            )));
        }
        Ok(Some(outcome))
    }

    async fn migrate_rows(&self, pairs: &[(TableSchema, TableSchema)]) -> Result<usize> {
        let mut total = 0;
        for (source, target) in pairs {
            let rows = self.legacy.select(&source.schema, &source.table_name, None).await?;
            if rows.is_empty() {
                continue;
            }
            let transformed = self.transform(&rows, source, target);
            let inserted = self.modern.insert(&target.schema, &target.table_name, transformed).await?;
            tracing::debug!(source = %source.key(), target = %target.key(), inserted, "table migrated");
            total += inserted;
        }
        Ok(total)
    }

    async fn validate(&self, pairs: &[(TableSchema, TableSchema)]) -> Result<Vec<TableValidation>> {
        let mut validations = Vec::with_capacity(pairs.len());
        for (source, target) in pairs {
            let source_rows = self.legacy.select(&source.schema, &source.table_name, None).await?;
            let target_rows = self.modern.select(&target.schema, &target.table_name, None).await?;
            let target_count = self.modern.count(&target.schema, &target.table_name).await?;

            let expected = fingerprint(self.transform(&source_rows, source, target));
            let actual = fingerprint(target_rows);

            let validation = TableValidation {
                table: source.key(),
                source_count: source_rows.len(),
                target_count,
                count_matched: source_rows.len() == target_count,
                content_matched: expected == actual,
            };
            if !validation.matched() {
                tracing::warn!(
                    table = %validation.table,
                    source_count = validation.source_count,
                    target_count = validation.target_count,
                    content_matched = validation.content_matched,
                    "validation mismatch"
                );
            }
            validations.push(validation);
        }
        Ok(validations)
    }

    fn transform(&self, rows: &[Record], source: &TableSchema, target: &TableSchema) -> Vec<Record> {
        rows.iter()
            .map(|r| self.mapper.transform_record(r, source, target))
            .collect()
    }
}

/// Sorted canonical forms, so equal vectors mean equal multisets
fn fingerprint(rows: Vec<Record>) -> Vec<String> {
    let mut out: Vec<String> = rows.into_iter().map(|r| canonical_json(&Value::Object(r))).collect();
    out.sort_unstable();
    out
}

fn validation_error(result: &MigrationRunResult) -> String {
    let tables: Vec<&str> = match result.phase(MigrationPhase::Validation).map(|p| &p.details) {
        Some(PhaseDetails::Validation { validations, .. }) => validations
            .iter()
            .filter(|v| !v.matched())
            .map(|v| v.table.as_str())
            .collect(),
        _ => Vec::new(),
    };
    format!("validation failed for tables: {}", tables.join(", "))
}
