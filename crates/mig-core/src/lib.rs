//! Migration core
//!
//! Drives customer migrations from plan to cutover, and whole-system data
//! migrations from legacy to modern stores:
//! - [`PlanOrchestrator`]: risk assessment, playbooks, simulation, execution and rollback per plan
//! - [`CutoverCoordinator`]: strategy-driven traffic switch with health-based rollback
//! - [`MigrationPipeline`]: risk → analysis → mapping → migration → validation
//! - [`RecordStore`] / [`ModernStore`]: storage seam, with [`InMemoryStore`]
//! - [`ConsensusCoordinator`]: weighted vote gate with a pluggable [`VoteProvider`]
//!
//! # Example
//!
//! ```rust,ignore
//! use mig_core::prelude::*;
//!
//! let orchestrator = PlanOrchestrator::new();
//! let plan = orchestrator.create_migration_plan(&customer, MigrationStrategy::Phased);
//! orchestrator.run_simulations(plan.plan_id.as_str())?;
//! orchestrator.execute_migration(plan.plan_id.as_str(), None)?;
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod consensus;
pub mod cutover;
pub mod error;
pub mod mapping;
pub mod pipeline;
pub mod plan;
pub mod store;

pub use config::{CutoverThresholds, OrchestratorConfig, PipelineConfig, SimulationSettings};
pub use consensus::{
    AgentRole, ConsensusCoordinator, ConsensusOutcome, Decision, DecisionKind, Participant, VoteProvider,
    DEFAULT_CONSENSUS_THRESHOLD,
};
pub use cutover::{
    cutover_id, plan_cutover_id, Cutover, CutoverCoordinator, CutoverHealth, CutoverMetrics, CutoverStatus, CutoverStep,
    CutoverStrategy, HealthStatus, RollbackRecord, RollbackStatus, StepStatus, ROLLBACK_STEPS,
};
pub use error::{Entity, ErrorContext, ErrorKind, MigrationError, Result};
pub use mapping::{SchemaAnalysis, SchemaAnalyzer, SchemaIssue, SchemaMapper, SchemaRecommendation};
pub use pipeline::{
    MigrationPhase, MigrationPipeline, MigrationRunResult, PhaseDetails, PhaseReport, PhaseStatus, TableMapping,
    TableValidation,
};
pub use plan::{
    AnalyticsOverview, ChannelSimulationSummary, ChannelStatusReport, MigrationStatusReport, PlanOrchestrator,
};
pub use store::{
    ColumnDef, ColumnType, EnvironmentStatus, InMemoryStore, ModernStore, Record, RecordStore, StoreError,
    TableSchema,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the migration core
    pub use crate::{
        CutoverStrategy, InMemoryStore, MigrationError, MigrationPipeline, OrchestratorConfig, PlanOrchestrator,
        RecordStore, Result,
    };
    pub use mig_model::prelude::*;
    pub use mig_risk::MigrationProfile;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use super::{CutoverStatus, HealthStatus};

    fn customer() -> Customer {
        Customer::new("CUST-9", "Northwind")
            .with_phone("+1-555-0100")
            .with_channel(
                IntegrationChannel::new("CH-SFTP", ChannelType::Sftp, "Nightly batch")
                    .with_target_endpoint("sftp://files.example/in"),
            )
    }

    #[test]
    fn plan_through_cutover() {
        let orch = PlanOrchestrator::new();
        let id = orch.create_migration_plan(&customer(), MigrationStrategy::Parallel).plan_id;
        orch.run_simulations(id.as_str()).unwrap();

        let cutover = orch
            .initiate_cutover(id.as_str(), "CH-SFTP", CutoverStrategy::Immediate)
            .unwrap();
        assert_eq!(orch.get_plan(id.as_str()).unwrap().overall_status, MigrationStatus::InProgress);
        assert_eq!(
            orch.cutovers().monitor(&cutover.cutover_id).unwrap().health_status,
            HealthStatus::Healthy
        );

        for _ in 0..3 {
            orch.advance_cutover(id.as_str(), &cutover.cutover_id).unwrap();
        }
        let plan = orch.get_plan(id.as_str()).unwrap();
        assert_eq!(plan.overall_status, MigrationStatus::Completed);
        assert!(plan.channel("CH-SFTP").unwrap().cutover_timestamp.is_some());
        assert_eq!(
            orch.cutovers().get(&cutover.cutover_id).unwrap().status,
            CutoverStatus::Completed
        );
    }

    #[test]
    fn version_is_set() {
        assert!(!super::VERSION.is_empty());
    }
}
