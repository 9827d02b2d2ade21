use mig_core::prelude::*;
use mig_core::{CutoverStatus, Entity, ErrorKind, PlanOrchestrator};
use mig_simulation::{Divergence, DivergentResponder, SimulationEngine, SimulationStatus};
use mig_test_utils::{critical_legacy_customer, low_risk_customer, rest_channel, two_channel_customer};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

/// Modern side breaks the REST "GET Request" scenario
fn failing_rest_orchestrator() -> PlanOrchestrator {
    let modern = DivergentResponder::default().diverge("GET Request", Divergence::Status("error".into()));
    PlanOrchestrator::new().with_simulation_engine(SimulationEngine::new().with_modern(Arc::new(modern)))
}

#[test]
fn phased_plan_for_two_channels() {
    let orch = PlanOrchestrator::new();
    let plan = orch.create_migration_plan(&two_channel_customer(), MigrationStrategy::Phased);

    assert_eq!(plan.channel_migrations.len(), 2);
    assert_eq!(plan.overall_status, MigrationStatus::Planning);
    let (start, completion) = (plan.planned_start.unwrap(), plan.planned_completion.unwrap());
    assert!(completion > start);
    assert_eq!(completion - start, chrono::Duration::weeks(4));
    assert!(plan
        .channel_migrations
        .iter()
        .all(|cm| cm.status == MigrationStatus::Planning && cm.rollback_available));
    assert_eq!(
        plan.channel_migrations[0].playbook_id.as_deref(),
        Some("PLAYBOOK-rest_api")
    );
}

#[test]
fn unknown_plan_is_not_found_everywhere() {
    let orch = PlanOrchestrator::new();
    let errors = [
        orch.get_migration_status("UNKNOWN").unwrap_err(),
        orch.run_simulations("UNKNOWN").unwrap_err(),
        orch.execute_migration("UNKNOWN", None).unwrap_err(),
        orch.rollback_migration("UNKNOWN", None, "test").unwrap_err(),
        orch.get_plan("UNKNOWN").unwrap_err(),
        orch.simulations("UNKNOWN").unwrap_err(),
    ];
    for err in errors {
        assert!(err.to_string().contains("not found"), "{err}");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.http_status(), 404);
    }
}

#[test]
fn full_lifecycle_reaches_completed() {
    let orch = PlanOrchestrator::new();
    let id = orch.create_migration_plan(&two_channel_customer(), MigrationStrategy::BigBang).plan_id;

    let summaries = orch.run_simulations(id.as_str()).unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|s| s.passed && s.status == SimulationStatus::Passed));
    let status = orch.get_migration_status(id.as_str()).unwrap();
    assert_eq!(status.overall_status, MigrationStatus::Ready);
    assert_eq!(status.progress_percentage, 60.0);
    assert_eq!(orch.simulations(id.as_str()).unwrap().len(), 2);

    let plan = orch.execute_migration(id.as_str(), None).unwrap();
    assert_eq!(plan.overall_status, MigrationStatus::Completed);
    assert!(plan.actual_start.is_some() && plan.actual_completion.is_some());
    for cm in &plan.channel_migrations {
        assert_eq!(cm.status, MigrationStatus::Completed);
        assert!(cm.cutover_timestamp.is_some());
        assert!(cm.notes.last().unwrap().starts_with("Migration completed at "));
    }
    assert_eq!(orch.get_migration_status(id.as_str()).unwrap().progress_percentage, 100.0);
}

#[test]
fn execute_requires_ready_and_changes_nothing() {
    let orch = PlanOrchestrator::new();
    let id = orch.create_migration_plan(&two_channel_customer(), MigrationStrategy::Phased).plan_id;
    let before = orch.get_plan(id.as_str()).unwrap();

    let err = orch.execute_migration(id.as_str(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(err.http_status(), 400);
    assert_eq!(err.context().get("current_status"), Some("planning"));
    assert_eq!(orch.get_plan(id.as_str()).unwrap(), before);
}

#[test]
fn status_lookup_is_pure() {
    let orch = PlanOrchestrator::new();
    let id = orch.create_migration_plan(&critical_legacy_customer(), MigrationStrategy::Parallel).plan_id;
    let before = orch.get_plan(id.as_str()).unwrap();
    let first = orch.get_migration_status(id.as_str()).unwrap();
    let second = orch.get_migration_status(id.as_str()).unwrap();
    assert_eq!(first, second);
    assert_eq!(orch.get_plan(id.as_str()).unwrap(), before);
    assert_eq!(first.progress_percentage, 10.0);
}

#[test]
fn one_failing_channel_keeps_every_channel_out_of_ready() {
    let orch = failing_rest_orchestrator();
    let id = orch.create_migration_plan(&two_channel_customer(), MigrationStrategy::Phased).plan_id;

    let summaries = orch.run_simulations(id.as_str()).unwrap();
    let rest = summaries.iter().find(|s| s.channel_id == "CH-REST-1").unwrap();
    assert!(!rest.passed);
    assert_eq!(rest.success_rate, 50.0);
    assert_eq!(rest.failed_scenarios, 1);

    let plan = orch.get_plan(id.as_str()).unwrap();
    assert_eq!(plan.overall_status, MigrationStatus::Simulation);
    assert!(plan.all_channels(MigrationStatus::Simulation));
    assert!(plan.channel("CH-EDI-1").unwrap().simulation_passed);
    assert!(!plan.channel("CH-REST-1").unwrap().simulation_passed);

    let err = orch.execute_migration(id.as_str(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn rollback_respects_availability() {
    let orch = PlanOrchestrator::new();
    let id = orch.create_migration_plan(&two_channel_customer(), MigrationStrategy::Phased).plan_id;

    let plan = orch.rollback_migration(id.as_str(), Some("CH-REST-1"), "data drift").unwrap();
    let cm = plan.channel("CH-REST-1").unwrap();
    assert_eq!(cm.status, MigrationStatus::RolledBack);
    assert_eq!(cm.notes.last().map(String::as_str), Some("Rolled back: data drift"));
    assert_eq!(plan.overall_status, MigrationStatus::RolledBack);
    assert_eq!(plan.channel("CH-EDI-1").unwrap().status, MigrationStatus::Planning);

    let err = orch.rollback_migration(id.as_str(), Some("CH-NOPE"), "x").unwrap_err();
    assert!(matches!(err, MigrationError::NotFound { entity: Entity::Channel, .. }));
}

#[test]
fn decommissioned_channel_refuses_rollback() {
    let orch = PlanOrchestrator::new();
    let id = orch.create_migration_plan(&two_channel_customer(), MigrationStrategy::Parallel).plan_id;
    orch.run_simulations(id.as_str()).unwrap();

    let cutover = orch
        .initiate_cutover(id.as_str(), "CH-EDI-1", CutoverStrategy::Parallel)
        .unwrap();
    for _ in 0..cutover.steps.len() {
        orch.advance_cutover(id.as_str(), &cutover.cutover_id).unwrap();
    }
    let plan = orch.get_plan(id.as_str()).unwrap();
    assert_eq!(plan.overall_status, MigrationStatus::Ready);
    assert!(!plan.channel("CH-EDI-1").unwrap().rollback_available);

    let plan = orch.rollback_migration(id.as_str(), None, "abort").unwrap();
    let edi = plan.channel("CH-EDI-1").unwrap();
    assert_eq!(edi.status, MigrationStatus::Completed);
    assert_eq!(edi.notes.last().map(String::as_str), Some("Rollback not available: abort"));
    assert_eq!(plan.channel("CH-REST-1").unwrap().status, MigrationStatus::RolledBack);
    assert_ne!(plan.overall_status, MigrationStatus::RolledBack);
}

#[test]
fn cutover_rollback_writes_back_into_plan() {
    let orch = PlanOrchestrator::new();
    let customer = Customer::new("CUST-1", "Solo").with_channel(rest_channel("CH-REST-1"));
    let id = orch.create_migration_plan(&customer, MigrationStrategy::Phased).plan_id;
    orch.run_simulations(id.as_str()).unwrap();

    let cutover = orch
        .initiate_cutover(id.as_str(), "CH-REST-1", CutoverStrategy::Gradual)
        .unwrap();
    orch.advance_cutover(id.as_str(), &cutover.cutover_id).unwrap();

    let record = orch
        .rollback_cutover(id.as_str(), &cutover.cutover_id, "latency spike")
        .unwrap();
    assert_eq!(record.steps.len(), 5);
    let plan = orch.get_plan(id.as_str()).unwrap();
    assert_eq!(plan.channel("CH-REST-1").unwrap().status, MigrationStatus::RolledBack);
    assert_eq!(plan.overall_status, MigrationStatus::RolledBack);
}

#[test]
fn plan_rollback_cancels_running_cutover() {
    let orch = PlanOrchestrator::new();
    let customer = Customer::new("CUST-1", "Solo").with_channel(rest_channel("CH-REST-1"));
    let id = orch.create_migration_plan(&customer, MigrationStrategy::Phased).plan_id;
    orch.run_simulations(id.as_str()).unwrap();

    let cutover = orch
        .initiate_cutover(id.as_str(), "CH-REST-1", CutoverStrategy::Immediate)
        .unwrap();
    let plan = orch.rollback_migration(id.as_str(), None, "abort").unwrap();
    assert_eq!(plan.overall_status, MigrationStatus::RolledBack);
    assert_eq!(
        orch.cutovers().get(&cutover.cutover_id).unwrap().status,
        CutoverStatus::RolledBack
    );

    let err = orch.advance_cutover(id.as_str(), &cutover.cutover_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    let plan = orch.get_plan(id.as_str()).unwrap();
    assert_eq!(plan.overall_status, MigrationStatus::RolledBack);
    assert_eq!(plan.channel("CH-REST-1").unwrap().status, MigrationStatus::RolledBack);
}

#[test]
fn plans_sharing_a_channel_id_keep_separate_cutovers() {
    let orch = PlanOrchestrator::new();
    let customer = Customer::new("CUST-1", "Solo").with_channel(rest_channel("CH-REST-1"));
    let first = orch.create_migration_plan(&customer, MigrationStrategy::Phased).plan_id;
    let second = orch.create_migration_plan(&customer, MigrationStrategy::Phased).plan_id;
    orch.run_simulations(first.as_str()).unwrap();
    orch.run_simulations(second.as_str()).unwrap();

    let a = orch
        .initiate_cutover(first.as_str(), "CH-REST-1", CutoverStrategy::Gradual)
        .unwrap();
    let b = orch
        .initiate_cutover(second.as_str(), "CH-REST-1", CutoverStrategy::Gradual)
        .unwrap();
    assert_ne!(a.cutover_id, b.cutover_id);
    assert_eq!(a.plan_id.as_ref(), Some(&first));

    let before = orch.get_plan(second.as_str()).unwrap();
    for err in [
        orch.advance_cutover(second.as_str(), &a.cutover_id).unwrap_err(),
        orch.rollback_cutover(second.as_str(), &a.cutover_id, "wrong plan").unwrap_err(),
    ] {
        assert!(matches!(err, MigrationError::NotFound { entity: Entity::Cutover, .. }), "{err}");
    }
    assert_eq!(orch.get_plan(second.as_str()).unwrap(), before);
    assert_eq!(orch.cutovers().get(&a.cutover_id).unwrap().current_step, 0);
}

#[test]
fn config_reaches_components() {
    let thresholds = mig_core::CutoverThresholds {
        max_error_rate: 2.0,
        max_latency_ms: 250.0,
    };
    let orch = PlanOrchestrator::from_config(&OrchestratorConfig::new().with_cutover_thresholds(thresholds)).unwrap();
    assert_eq!(orch.cutovers().thresholds(), thresholds);

    let invalid = OrchestratorConfig::new().with_pass_threshold(-1.0);
    assert!(PlanOrchestrator::from_config(&invalid).is_err());
}

fn strategy() -> impl Strategy<Value = MigrationStrategy> {
    prop_oneof![
        Just(MigrationStrategy::Phased),
        Just(MigrationStrategy::BigBang),
        Just(MigrationStrategy::Parallel),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_ready_iff_all_simulations_pass(diverge in any::<bool>(), strategy in strategy()) {
        let orch = if diverge { failing_rest_orchestrator() } else { PlanOrchestrator::new() };
        let id = orch.create_migration_plan(&two_channel_customer(), strategy).plan_id;
        let summaries = orch.run_simulations(id.as_str()).unwrap();
        let all_passed = summaries.iter().all(|s| s.passed);
        let plan = orch.get_plan(id.as_str()).unwrap();

        prop_assert_eq!(all_passed, !diverge);
        if all_passed {
            prop_assert!(plan.all_channels(MigrationStatus::Ready));
            prop_assert_eq!(plan.overall_status, MigrationStatus::Ready);
        } else {
            prop_assert!(plan.channel_migrations.iter().all(|cm| cm.status != MigrationStatus::Ready));
        }
    }

    #[test]
    fn prop_planned_completion_after_start(strategy in strategy(), critical in any::<bool>()) {
        let customer = if critical { critical_legacy_customer() } else { low_risk_customer() };
        let plan = PlanOrchestrator::new().create_migration_plan(&customer, strategy);
        prop_assert!(plan.planned_completion.unwrap() > plan.planned_start.unwrap());
    }
}
