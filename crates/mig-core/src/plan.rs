//! Migration plan orchestration
//!
//! [`PlanOrchestrator`] owns every plan created through it and drives each one
//! through the status machine:
//!
//! ```text
//! planning → simulation → ready → in_progress → completed
//!                 ↑          │          │
//!                 └──────────┘          └→ ready (phased: next channel)
//! any non-terminal state → rolled_back
//! ```
//!
//! Each mutation holds the plan's registry entry for its whole duration, so
//! concurrent callers on the same plan are serialised.

use crate::config::OrchestratorConfig;
use crate::cutover::{plan_cutover_id, Cutover, CutoverCoordinator, CutoverStatus, CutoverStrategy, RollbackRecord};
use crate::error::{Entity, MigrationError, Result};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use mig_model::{
    validate_transition, ChannelMigration, ChannelType, Customer, MigrationPlan, MigrationStatus, MigrationStrategy,
    PlanId,
};
use mig_playbook::{playbook_id, PlaybookRegistry};
use mig_risk::RiskAssessor;
use mig_simulation::{MigrationSimulation, SimulationEngine, SimulationStatus};
use serde::{Deserialize, Serialize};

/// Registry entry: the plan, the customer it was built from and its latest simulations
#[derive(Debug, Clone)]
struct PlanEntry {
    plan: MigrationPlan,
    customer: Customer,
    simulations: Vec<MigrationSimulation>,
}

/// Outcome of simulating one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSimulationSummary {
    /// Channel simulated
    pub channel_id: String,
    /// Simulation id
    pub simulation_id: String,
    /// Aggregate status
    pub status: SimulationStatus,
    /// Success rate in percent
    pub success_rate: f64,
    /// Scenario count
    pub total_scenarios: usize,
    /// Scenarios without differences
    pub successful_scenarios: usize,
    /// Scenarios with differences
    pub failed_scenarios: usize,
    /// Whether the channel passed
    pub passed: bool,
}

impl From<&MigrationSimulation> for ChannelSimulationSummary {
    fn from(sim: &MigrationSimulation) -> Self {
        Self {
            channel_id: sim.channel_id.clone(),
            simulation_id: sim.simulation_id.clone(),
            status: sim.overall_status,
            success_rate: sim.success_rate,
            total_scenarios: sim.scenarios.len(),
            successful_scenarios: sim.successful_scenarios(),
            failed_scenarios: sim.failed_scenarios(),
            passed: sim.passed(),
        }
    }
}

/// Per-channel line of a status report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelStatusReport {
    /// Channel id
    pub channel_id: String,
    /// Channel type
    pub channel_type: ChannelType,
    /// Status
    pub status: MigrationStatus,
    /// Channel risk score
    pub risk_score: f64,
    /// Last simulation passed
    pub simulation_passed: bool,
    /// Cutover time
    pub cutover_timestamp: Option<DateTime<Utc>>,
}

/// Read-only snapshot of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationStatusReport {
    /// Plan id
    pub plan_id: PlanId,
    /// Customer id
    pub customer_id: String,
    /// Customer name
    pub customer_name: String,
    /// Overall status
    pub overall_status: MigrationStatus,
    /// Customer risk score
    pub overall_risk_score: f64,
    /// Mean channel progress
    pub progress_percentage: f64,
    /// Planned start
    pub planned_start: Option<DateTime<Utc>>,
    /// Planned completion
    pub planned_completion: Option<DateTime<Utc>>,
    /// Actual start
    pub actual_start: Option<DateTime<Utc>>,
    /// Actual completion
    pub actual_completion: Option<DateTime<Utc>>,
    /// Channels in plan order
    pub channels: Vec<ChannelStatusReport>,
}

impl From<&MigrationPlan> for MigrationStatusReport {
    fn from(plan: &MigrationPlan) -> Self {
        Self {
            plan_id: plan.plan_id.clone(),
            customer_id: plan.customer_id.clone(),
            customer_name: plan.customer_name.clone(),
            overall_status: plan.overall_status,
            overall_risk_score: plan.overall_risk_score,
            progress_percentage: plan.progress_percentage(),
            planned_start: plan.planned_start,
            planned_completion: plan.planned_completion,
            actual_start: plan.actual_start,
            actual_completion: plan.actual_completion,
            channels: plan
                .channel_migrations
                .iter()
                .map(|cm| ChannelStatusReport {
                    channel_id: cm.channel_id.clone(),
                    channel_type: cm.channel_type,
                    status: cm.status,
                    risk_score: cm.risk_score,
                    simulation_passed: cm.simulation_passed,
                    cutover_timestamp: cm.cutover_timestamp,
                })
                .collect(),
        }
    }
}

/// Portfolio-wide counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    /// Plans created
    pub total_plans: usize,
    /// Plans completed
    pub completed: usize,
    /// Plans in progress
    pub in_progress: usize,
    /// Plans rolled back
    pub rolled_back: usize,
    /// Plans failed
    pub failed: usize,
    /// `completed / total * 100`; 0 without plans
    pub success_rate: f64,
    /// Mean plan risk score; 0 without plans
    pub average_risk_score: f64,
}

/// Owns migration plans and drives them through their lifecycle
#[derive(Debug)]
pub struct PlanOrchestrator {
    plans: DashMap<PlanId, PlanEntry>,
    risk: RiskAssessor,
    playbooks: PlaybookRegistry,
    simulation: SimulationEngine,
    cutovers: CutoverCoordinator,
}

impl Default for PlanOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanOrchestrator {
    /// Create orchestrator with default components
    #[must_use]
    pub fn new() -> Self {
        Self {
            plans: DashMap::new(),
            risk: RiskAssessor::new(),
            playbooks: PlaybookRegistry::with_defaults(),
            simulation: SimulationEngine::new(),
            cutovers: CutoverCoordinator::new(),
        }
    }

    /// Create orchestrator from configuration
    ///
    /// # Errors
    /// Propagates [`OrchestratorConfig::validate`] failures.
    pub fn from_config(config: &OrchestratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            risk: RiskAssessor::with_weights(config.risk_weights)?,
            simulation: SimulationEngine::new().with_pass_threshold(config.simulation.pass_threshold),
            cutovers: CutoverCoordinator::new().with_thresholds(config.cutover),
            ..Self::new()
        })
    }

    /// With simulation engine
    #[inline]
    #[must_use]
    pub fn with_simulation_engine(mut self, engine: SimulationEngine) -> Self {
        self.simulation = engine;
        self
    }

    /// With playbook registry
    #[inline]
    #[must_use]
    pub fn with_playbooks(mut self, registry: PlaybookRegistry) -> Self {
        self.playbooks = registry;
        self
    }

    /// With risk assessor
    #[inline]
    #[must_use]
    pub fn with_risk_assessor(mut self, assessor: RiskAssessor) -> Self {
        self.risk = assessor;
        self
    }

    /// Risk assessor in use
    #[inline]
    #[must_use]
    pub fn risk_assessor(&self) -> &RiskAssessor {
        &self.risk
    }

    /// Cutover coordinator, for stepping and monitoring cutovers
    #[inline]
    #[must_use]
    pub fn cutovers(&self) -> &CutoverCoordinator {
        &self.cutovers
    }

    /// Number of plans
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether no plan exists
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Assess, assign playbooks, schedule and store a new plan
    pub fn create_migration_plan(&self, customer: &Customer, strategy: MigrationStrategy) -> MigrationPlan {
        let customer_risk = self.risk.assess_customer(customer);

        let channel_migrations = customer
            .channels
            .iter()
            .map(|channel| {
                let channel_risk = self.risk.assess_channel(customer, channel);
                let mut playbook = self.playbooks.select(channel);
                let step_count = playbook.generate_steps().len();

                let mut cm = ChannelMigration::new(channel.channel_id.clone(), channel.channel_type);
                cm.status = MigrationStatus::Planning;
                cm.risk_score = channel_risk.overall_risk_score;
                cm.playbook_id = Some(playbook_id(channel.channel_type));
                cm.note(format!("Migration playbook: {step_count} steps"));
                cm.note(format!("Risk level: {}", channel_risk.risk_level));
                cm.note(format!("Readiness score: {:.1}", channel_risk.migration_readiness_score));
                cm
            })
            .collect::<Vec<_>>();

        let now = Utc::now();
        let (start, completion) = strategy.timeline(customer.channels.len(), now);
        let plan = MigrationPlan {
            plan_id: PlanId::generate(),
            customer_id: customer.customer_id.clone(),
            customer_name: customer.name.clone(),
            overall_status: MigrationStatus::Planning,
            channel_migrations,
            overall_risk_score: customer_risk.overall_risk_score,
            created_at: now,
            planned_start: Some(start),
            planned_completion: Some(completion),
            actual_start: None,
            actual_completion: None,
            migration_strategy: strategy,
        };

        tracing::info!(
            plan_id = %plan.plan_id,
            customer_id = %plan.customer_id,
            %strategy,
            channels = plan.channel_migrations.len(),
            risk_score = plan.overall_risk_score,
            "migration plan created"
        );

        self.plans.insert(
            plan.plan_id.clone(),
            PlanEntry {
                plan: plan.clone(),
                customer: customer.clone(),
                simulations: Vec::new(),
            },
        );
        plan
    }

    /// Simulate every channel of a plan
    ///
    /// Channels move to `simulation`; only when every simulation passes do the
    /// channels and the plan become `ready`.
    ///
    /// # Errors
    /// Not-found for an unknown plan; invalid-state once the plan is executing
    /// or finished.
    pub fn run_simulations(&self, plan_id: &str) -> Result<Vec<ChannelSimulationSummary>> {
        let mut entry = self
            .plans
            .get_mut(&PlanId::from(plan_id))
            .ok_or_else(|| MigrationError::not_found(Entity::Plan, plan_id))?;
        let PlanEntry {
            plan,
            customer,
            simulations,
        } = entry.value_mut();

        if !matches!(
            plan.overall_status,
            MigrationStatus::Planning | MigrationStatus::RiskAssessment | MigrationStatus::Simulation | MigrationStatus::Ready
        ) {
            return Err(MigrationError::invalid_state(
                Entity::Plan,
                plan_id,
                plan.overall_status,
                "simulate",
            ));
        }
        if let Some(cm) = plan
            .channel_migrations
            .iter()
            .find(|cm| cm.status.is_terminal() || cm.status == MigrationStatus::InProgress)
        {
            return Err(MigrationError::invalid_state(
                Entity::Channel,
                cm.channel_id.clone(),
                cm.status,
                "simulate",
            ));
        }
        // Every channel must still be resolvable before anything changes
        let channels = plan
            .channel_migrations
            .iter()
            .map(|cm| {
                customer
                    .channel(&cm.channel_id)
                    .cloned()
                    .ok_or_else(|| MigrationError::not_found(Entity::Channel, cm.channel_id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        transition(plan, MigrationStatus::Simulation, "simulate")?;
        let mut runs = Vec::with_capacity(channels.len());
        for (cm, channel) in plan.channel_migrations.iter_mut().zip(&channels) {
            cm.status = MigrationStatus::Simulation;
            let sim = self.simulation.run(&customer.customer_id, channel);
            cm.simulation_passed = sim.passed();
            cm.note(format!(
                "Simulation {}: {:.1}% success ({})",
                sim.simulation_id, sim.success_rate, sim.overall_status
            ));
            runs.push(sim);
        }

        if plan.channel_migrations.iter().all(|cm| cm.simulation_passed) {
            for cm in &mut plan.channel_migrations {
                cm.status = MigrationStatus::Ready;
            }
            transition(plan, MigrationStatus::Ready, "simulate")?;
            tracing::info!(plan_id, "all simulations passed, plan ready");
        } else {
            let failed: Vec<_> = runs.iter().filter(|s| !s.passed()).map(|s| s.channel_id.as_str()).collect();
            tracing::warn!(plan_id, failed_channels = ?failed, "simulations failed, plan stays in simulation");
        }

        let summaries = runs.iter().map(ChannelSimulationSummary::from).collect();
        *simulations = runs;
        Ok(summaries)
    }

    /// Execute one ready channel, or every ready channel
    ///
    /// The plan is `completed` once every channel is; otherwise it returns to
    /// `ready` for the next channel.
    ///
    /// # Errors
    /// Not-found for an unknown plan or channel; invalid-state when the plan
    /// (or the targeted channel) is not ready. Nothing is changed on error.
    pub fn execute_migration(&self, plan_id: &str, channel_id: Option<&str>) -> Result<MigrationPlan> {
        let mut entry = self
            .plans
            .get_mut(&PlanId::from(plan_id))
            .ok_or_else(|| MigrationError::not_found(Entity::Plan, plan_id))?;
        let plan = &mut entry.value_mut().plan;

        if plan.overall_status != MigrationStatus::Ready {
            return Err(MigrationError::invalid_state(
                Entity::Plan,
                plan_id,
                plan.overall_status,
                "execute",
            ));
        }
        if let Some(id) = channel_id {
            let cm = plan
                .channel(id)
                .ok_or_else(|| MigrationError::not_found(Entity::Channel, id))?;
            if cm.status != MigrationStatus::Ready {
                return Err(MigrationError::invalid_state(Entity::Channel, id, cm.status, "execute"));
            }
        }

        transition(plan, MigrationStatus::InProgress, "execute")?;
        plan.actual_start.get_or_insert(Utc::now());

        for cm in plan
            .channel_migrations
            .iter_mut()
            .filter(|cm| cm.status == MigrationStatus::Ready)
            .filter(|cm| channel_id.map_or(true, |id| cm.channel_id == id))
        {
            cm.status = MigrationStatus::InProgress;
            cm.cutover_timestamp = Some(Utc::now());
            cm.status = MigrationStatus::Completed;
            let done = Utc::now();
            cm.note(format!("Migration completed at {}", done.to_rfc3339()));
            tracing::info!(plan_id, channel_id = %cm.channel_id, "channel migrated");
        }

        settle_after_execution(plan)?;
        Ok(plan.clone())
    }

    /// Roll back one channel, or every channel
    ///
    /// Channels without rollback availability get a refusal note and keep
    /// their status. A running cutover of a rolled back channel is reverted
    /// with it. The plan is `rolled_back` only when every targeted channel is.
    ///
    /// # Errors
    /// Not-found for an unknown plan or channel.
    pub fn rollback_migration(&self, plan_id: &str, channel_id: Option<&str>, reason: &str) -> Result<MigrationPlan> {
        let mut entry = self
            .plans
            .get_mut(&PlanId::from(plan_id))
            .ok_or_else(|| MigrationError::not_found(Entity::Plan, plan_id))?;
        let plan = &mut entry.value_mut().plan;

        if let Some(id) = channel_id {
            if plan.channel(id).is_none() {
                return Err(MigrationError::not_found(Entity::Channel, id));
            }
        }

        let owner = plan.plan_id.clone();
        let mut targeted = 0usize;
        let mut rolled_back = 0usize;
        let mut cancelled = 0usize;
        for cm in plan
            .channel_migrations
            .iter_mut()
            .filter(|cm| channel_id.map_or(true, |id| cm.channel_id == id))
        {
            targeted += 1;
            if cm.rollback_available {
                cm.status = MigrationStatus::RolledBack;
                cm.note(format!("Rolled back: {reason}"));
                rolled_back += 1;
                if self
                    .cutovers
                    .rollback_if_active(&plan_cutover_id(&owner, &cm.channel_id), reason)
                    .is_some()
                {
                    cancelled += 1;
                }
                tracing::warn!(plan_id, channel_id = %cm.channel_id, reason, "channel rolled back");
            } else {
                cm.note(format!("Rollback not available: {reason}"));
                tracing::warn!(plan_id, channel_id = %cm.channel_id, reason, "rollback not available");
            }
        }

        if targeted > 0 && targeted == rolled_back {
            transition(plan, MigrationStatus::RolledBack, "roll back")?;
            tracing::warn!(plan_id, "plan rolled back");
        } else if cancelled > 0 && plan.overall_status == MigrationStatus::InProgress {
            transition(plan, MigrationStatus::Ready, "roll back")?;
        }
        Ok(plan.clone())
    }

    /// Snapshot of a plan's status; never mutates
    ///
    /// # Errors
    /// Not-found for an unknown plan.
    pub fn get_migration_status(&self, plan_id: &str) -> Result<MigrationStatusReport> {
        self.plans
            .get(&PlanId::from(plan_id))
            .map(|entry| MigrationStatusReport::from(&entry.plan))
            .ok_or_else(|| MigrationError::not_found(Entity::Plan, plan_id))
    }

    /// Copy of a plan
    ///
    /// # Errors
    /// Not-found for an unknown plan.
    pub fn get_plan(&self, plan_id: &str) -> Result<MigrationPlan> {
        self.plans
            .get(&PlanId::from(plan_id))
            .map(|entry| entry.plan.clone())
            .ok_or_else(|| MigrationError::not_found(Entity::Plan, plan_id))
    }

    /// Every plan, oldest first
    #[must_use]
    pub fn list_plans(&self) -> Vec<MigrationPlan> {
        let mut plans: Vec<_> = self.plans.iter().map(|entry| entry.plan.clone()).collect();
        plans.sort_by(|a, b| a.plan_id.cmp(&b.plan_id));
        plans
    }

    /// Simulations from the latest `run_simulations` call
    ///
    /// # Errors
    /// Not-found for an unknown plan.
    pub fn simulations(&self, plan_id: &str) -> Result<Vec<MigrationSimulation>> {
        self.plans
            .get(&PlanId::from(plan_id))
            .map(|entry| entry.simulations.clone())
            .ok_or_else(|| MigrationError::not_found(Entity::Plan, plan_id))
    }

    /// Counters across every plan
    #[must_use]
    pub fn analytics(&self) -> AnalyticsOverview {
        let mut overview = AnalyticsOverview::default();
        let mut risk_total = 0.0;
        for entry in &self.plans {
            overview.total_plans += 1;
            risk_total += entry.plan.overall_risk_score;
            match entry.plan.overall_status {
                MigrationStatus::Completed => overview.completed += 1,
                MigrationStatus::InProgress => overview.in_progress += 1,
                MigrationStatus::RolledBack => overview.rolled_back += 1,
                MigrationStatus::Failed => overview.failed += 1,
                _ => {}
            }
        }
        if overview.total_plans > 0 {
            let total = overview.total_plans as f64;
            overview.success_rate = overview.completed as f64 / total * 100.0;
            overview.average_risk_score = risk_total / total;
        }
        overview
    }

    /// Start a cutover for a ready channel of a ready plan
    ///
    /// The plan is `in_progress` until the cutover finishes.
    ///
    /// # Errors
    /// Not-found for an unknown plan or channel; invalid-state when the plan or
    /// channel is not ready, or the channel already has an active cutover.
    pub fn initiate_cutover(&self, plan_id: &str, channel_id: &str, strategy: CutoverStrategy) -> Result<Cutover> {
        let mut entry = self
            .plans
            .get_mut(&PlanId::from(plan_id))
            .ok_or_else(|| MigrationError::not_found(Entity::Plan, plan_id))?;
        let plan = &mut entry.value_mut().plan;

        if plan.overall_status != MigrationStatus::Ready {
            return Err(MigrationError::invalid_state(
                Entity::Plan,
                plan_id,
                plan.overall_status,
                "cut over",
            ));
        }
        let cm = plan
            .channel(channel_id)
            .ok_or_else(|| MigrationError::not_found(Entity::Channel, channel_id))?;
        if cm.status != MigrationStatus::Ready {
            return Err(MigrationError::invalid_state(
                Entity::Channel,
                channel_id,
                cm.status,
                "cut over",
            ));
        }

        let cutover = self.cutovers.initiate_in_plan(&plan.plan_id, cm.clone(), strategy)?;
        transition(plan, MigrationStatus::InProgress, "cut over")?;
        plan.actual_start.get_or_insert(cutover.started_at);
        write_back(plan, &cutover.channel);
        Ok(cutover)
    }

    /// Execute the next step of a plan's cutover and write the channel back
    ///
    /// # Errors
    /// Not-found for an unknown plan, cutover or a cutover of another plan;
    /// invalid-state unless the plan is `in_progress` and the channel is
    /// neither rolled back nor failed; errors of
    /// [`CutoverCoordinator::execute_next_step`].
    pub fn advance_cutover(&self, plan_id: &str, cutover_id: &str) -> Result<Cutover> {
        let mut entry = self
            .plans
            .get_mut(&PlanId::from(plan_id))
            .ok_or_else(|| MigrationError::not_found(Entity::Plan, plan_id))?;
        let plan = &mut entry.value_mut().plan;

        let channel_id = self.owned_cutover(plan, cutover_id)?.channel_id;
        if plan.overall_status != MigrationStatus::InProgress {
            return Err(MigrationError::invalid_state(
                Entity::Plan,
                plan_id,
                plan.overall_status,
                "advance cutover",
            ));
        }
        if let Some(cm) = plan.channel(&channel_id) {
            if matches!(cm.status, MigrationStatus::RolledBack | MigrationStatus::Failed) {
                return Err(MigrationError::invalid_state(
                    Entity::Channel,
                    channel_id,
                    cm.status,
                    "advance cutover",
                ));
            }
        }

        let cutover = self.cutovers.execute_next_step(cutover_id)?;
        write_back(plan, &cutover.channel);
        if cutover.status == CutoverStatus::Completed && plan.overall_status == MigrationStatus::InProgress {
            settle_after_execution(plan)?;
        }
        Ok(cutover)
    }

    /// Roll back a plan's cutover and write the channel back
    ///
    /// The plan is `rolled_back` when every channel is; otherwise it leaves
    /// `in_progress` for `ready`.
    ///
    /// # Errors
    /// Not-found for an unknown plan, cutover or a cutover of another plan;
    /// errors of [`CutoverCoordinator::rollback`].
    pub fn rollback_cutover(&self, plan_id: &str, cutover_id: &str, reason: &str) -> Result<RollbackRecord> {
        let mut entry = self
            .plans
            .get_mut(&PlanId::from(plan_id))
            .ok_or_else(|| MigrationError::not_found(Entity::Plan, plan_id))?;
        let plan = &mut entry.value_mut().plan;

        self.owned_cutover(plan, cutover_id)?;

        let record = self.cutovers.rollback(cutover_id, reason)?;
        let cutover = self.cutovers.get(cutover_id)?;
        write_back(plan, &cutover.channel);

        if plan.all_channels(MigrationStatus::RolledBack) {
            transition(plan, MigrationStatus::RolledBack, "roll back")?;
        } else if plan.overall_status == MigrationStatus::InProgress {
            transition(plan, MigrationStatus::Ready, "roll back")?;
        }
        Ok(record)
    }

    /// The cutover, provided it was started by `plan`
    fn owned_cutover(&self, plan: &MigrationPlan, cutover_id: &str) -> Result<Cutover> {
        let cutover = self.cutovers.get(cutover_id)?;
        if cutover.plan_id.as_ref() != Some(&plan.plan_id) {
            return Err(MigrationError::not_found(Entity::Cutover, cutover_id));
        }
        Ok(cutover)
    }
}

/// Move the plan along a legal edge of the status machine
fn transition(plan: &mut MigrationPlan, to: MigrationStatus, operation: &'static str) -> Result<()> {
    validate_transition(plan.overall_status, to)
        .map_err(|(from, _)| MigrationError::invalid_state(Entity::Plan, plan.plan_id.as_str(), from, operation))?;
    plan.overall_status = to;
    Ok(())
}

/// Completed when every channel is, otherwise back to ready
fn settle_after_execution(plan: &mut MigrationPlan) -> Result<()> {
    if plan.all_channels(MigrationStatus::Completed) {
        transition(plan, MigrationStatus::Completed, "complete")?;
        plan.actual_completion = Some(Utc::now());
        tracing::info!(plan_id = %plan.plan_id, "migration plan completed");
    } else {
        transition(plan, MigrationStatus::Ready, "complete")?;
    }
    Ok(())
}

fn write_back(plan: &mut MigrationPlan, channel: &ChannelMigration) {
    if let Some(cm) = plan.channel_mut(&channel.channel_id) {
        *cm = channel.clone();
    }
}
