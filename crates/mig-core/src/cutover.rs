//! Cutover coordination
//!
//! A cutover switches one channel's live traffic from legacy to modern through
//! a fixed, strategy-dependent step list:
//!
//! ```text
//! initiated → in_progress → completed
//!      └───────────┴──────→ rolled_back
//! ```
//!
//! The coordinator owns a copy of the channel migration being cut over and
//! keeps it in step with the cutover; callers holding the plan write it back.

use crate::config::CutoverThresholds;
use crate::error::{Entity, MigrationError, Result};
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mig_model::{ChannelMigration, MigrationStatus, PlanId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reversal script run by every rollback
pub const ROLLBACK_STEPS: [&str; 5] = [
    "Stop routing traffic to modern platform",
    "Restore routing to legacy platform",
    "Verify legacy system operational",
    "Capture diagnostic logs",
    "Notify stakeholders",
];

/// How traffic is moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoverStrategy {
    /// Switch everything at once
    Immediate,
    /// Ramp 10% → 50% → 100%
    #[default]
    Gradual,
    /// Run both systems, then decommission legacy
    Parallel,
    /// Small user subset first
    Canary,
}

impl CutoverStrategy {
    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CutoverStrategy::Immediate => "immediate",
            CutoverStrategy::Gradual => "gradual",
            CutoverStrategy::Parallel => "parallel",
            CutoverStrategy::Canary => "canary",
        }
    }

    /// `(name, description)` of each step, in order
    #[must_use]
    pub fn step_templates(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            CutoverStrategy::Immediate => &[
                ("Pre-cutover validation", "Validate modern system ready"),
                ("Switch traffic", "Route all traffic to modern platform"),
                ("Validate operation", "Confirm modern platform processing correctly"),
            ],
            CutoverStrategy::Gradual => &[
                ("Route 10% traffic", "Send 10% of traffic to modern platform"),
                ("Monitor 10% traffic", "Monitor for 15 minutes"),
                ("Route 50% traffic", "Increase to 50% traffic"),
                ("Monitor 50% traffic", "Monitor for 30 minutes"),
                ("Route 100% traffic", "Route all traffic to modern platform"),
                ("Final validation", "Confirm full cutover successful"),
            ],
            CutoverStrategy::Parallel => &[
                ("Start parallel run", "Process in both systems simultaneously"),
                ("Compare outputs", "Validate modern matches legacy"),
                ("Build confidence", "Run for configured period (e.g., 7 days)"),
                ("Switch to modern", "Make modern platform primary"),
                ("Stop legacy processing", "Decommission legacy system"),
            ],
            CutoverStrategy::Canary => &[
                ("Select canary users", "Choose small subset of users"),
                ("Migrate canary users", "Move canary users to modern platform"),
                ("Monitor canary", "Monitor canary users for 48 hours"),
                ("Expand to all users", "Migrate remaining users"),
                ("Final validation", "Confirm all users migrated successfully"),
            ],
        }
    }

    fn steps(self) -> Vec<CutoverStep> {
        self.step_templates()
            .iter()
            .zip(1u32..)
            .map(|(&(name, description), step)| CutoverStep {
                step,
                name: name.to_string(),
                description: description.to_string(),
                status: StepStatus::Pending,
                started_at: None,
                completed_at: None,
            })
            .collect()
    }
}

impl fmt::Display for CutoverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CutoverStrategy {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediate" => Ok(Self::Immediate),
            "gradual" => Ok(Self::Gradual),
            "parallel" => Ok(Self::Parallel),
            "canary" => Ok(Self::Canary),
            _ => Err(MigrationError::Config(format!(
                "unknown cutover strategy: {s} (expected immediate, gradual, parallel or canary)"
            ))),
        }
    }
}

/// Cutover lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoverStatus {
    /// Steps built, none executed
    Initiated,
    /// Some steps executed
    InProgress,
    /// Every step executed
    Completed,
    /// Reverted to legacy
    RolledBack,
}

impl CutoverStatus {
    /// Whether the cutover can still advance
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, CutoverStatus::Initiated | CutoverStatus::InProgress)
    }

    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CutoverStatus::Initiated => "initiated",
            CutoverStatus::InProgress => "in_progress",
            CutoverStatus::Completed => "completed",
            CutoverStatus::RolledBack => "rolled_back",
        }
    }
}

impl fmt::Display for CutoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not started
    Pending,
    /// Executing
    InProgress,
    /// Done
    Completed,
}

/// One cutover step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoverStep {
    /// 1-based position
    pub step: u32,
    /// Step name
    pub name: String,
    /// What the step does
    pub description: String,
    /// Status
    pub status: StepStatus,
    /// Start time
    pub started_at: Option<DateTime<Utc>>,
    /// Completion time
    pub completed_at: Option<DateTime<Utc>>,
}

/// Live health metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CutoverMetrics {
    /// Error rate in percent
    pub error_rate: f64,
    /// Transactions observed
    pub transaction_count: u64,
    /// Mean latency in milliseconds
    pub latency_ms: f64,
}

/// Health verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Within thresholds
    Healthy,
    /// At least one threshold exceeded
    Degraded,
}

/// Result of [`CutoverCoordinator::monitor`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoverHealth {
    /// Cutover id
    pub cutover_id: String,
    /// Cutover status
    pub status: CutoverStatus,
    /// Health verdict
    pub health_status: HealthStatus,
    /// Metrics evaluated
    pub metrics: CutoverMetrics,
    /// One entry per exceeded threshold
    pub warnings: Vec<String>,
    /// `"{executed}/{total}"`
    pub step_progress: String,
}

/// Rollback lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackStatus {
    /// Script running
    RollingBack,
    /// Script finished
    Completed,
}

/// Record of one rollback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackRecord {
    /// Cutover rolled back
    pub cutover_id: String,
    /// Caller-supplied reason
    pub reason: String,
    /// Status
    pub status: RollbackStatus,
    /// Script steps, in execution order
    pub steps: Vec<String>,
    /// Start time
    pub rollback_initiated_at: DateTime<Utc>,
    /// Completion time
    pub completed_at: Option<DateTime<Utc>>,
}

/// One channel's cutover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutover {
    /// `CUTOVER-{channel_id}`, or `CUTOVER-{plan_id}-{channel_id}` inside a plan
    pub cutover_id: String,
    /// Plan the channel belongs to, when started through a plan
    pub plan_id: Option<PlanId>,
    /// Channel being cut over
    pub channel_id: String,
    /// Strategy
    pub strategy: CutoverStrategy,
    /// Status
    pub status: CutoverStatus,
    /// Steps in execution order
    pub steps: Vec<CutoverStep>,
    /// Index of the next step to execute
    pub current_step: usize,
    /// Latest metrics
    pub metrics: CutoverMetrics,
    /// Initiation time
    pub started_at: DateTime<Utc>,
    /// Completion time
    pub completed_at: Option<DateTime<Utc>>,
    /// Channel migration as updated by this cutover
    pub channel: ChannelMigration,
    /// Rollback, once performed
    pub rollback: Option<RollbackRecord>,
}

impl Cutover {
    /// `"{executed}/{total}"`
    #[must_use]
    pub fn step_progress(&self) -> String {
        format!("{}/{}", self.current_step, self.steps.len())
    }
}

/// Cutover id for a channel
#[inline]
#[must_use]
pub fn cutover_id(channel_id: &str) -> String {
    format!("CUTOVER-{channel_id}")
}

/// Cutover id for a channel of a plan
#[inline]
#[must_use]
pub fn plan_cutover_id(plan_id: &PlanId, channel_id: &str) -> String {
    format!("CUTOVER-{plan_id}-{channel_id}")
}

/// Registry of cutovers keyed by cutover id
#[derive(Debug, Default)]
pub struct CutoverCoordinator {
    cutovers: DashMap<String, Cutover>,
    thresholds: CutoverThresholds,
}

impl CutoverCoordinator {
    /// Create coordinator with default thresholds
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With health thresholds
    #[inline]
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: CutoverThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Health thresholds
    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> CutoverThresholds {
        self.thresholds
    }

    /// Number of known cutovers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cutovers.len()
    }

    /// Whether no cutover is known
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cutovers.is_empty()
    }

    /// Start a cutover for `channel`
    ///
    /// A finished cutover for the same channel is replaced.
    ///
    /// # Errors
    /// Invalid-state when the channel is failed or rolled back, or when its
    /// previous cutover is still active.
    pub fn initiate(&self, channel: ChannelMigration, strategy: CutoverStrategy) -> Result<Cutover> {
        self.start(None, channel, strategy)
    }

    /// Start a cutover for a channel of `plan_id`
    ///
    /// The id is scoped to the plan, so plans sharing channel ids never
    /// collide.
    ///
    /// # Errors
    /// As [`initiate`](Self::initiate).
    pub fn initiate_in_plan(
        &self,
        plan_id: &PlanId,
        channel: ChannelMigration,
        strategy: CutoverStrategy,
    ) -> Result<Cutover> {
        self.start(Some(plan_id.clone()), channel, strategy)
    }

    fn start(&self, plan_id: Option<PlanId>, channel: ChannelMigration, strategy: CutoverStrategy) -> Result<Cutover> {
        if matches!(channel.status, MigrationStatus::Failed | MigrationStatus::RolledBack) {
            return Err(MigrationError::invalid_state(
                Entity::Channel,
                channel.channel_id,
                channel.status,
                "cut over",
            ));
        }

        let id = match &plan_id {
            Some(plan) => plan_cutover_id(plan, &channel.channel_id),
            None => cutover_id(&channel.channel_id),
        };
        let cutover = Cutover {
            cutover_id: id.clone(),
            plan_id,
            channel_id: channel.channel_id.clone(),
            strategy,
            status: CutoverStatus::Initiated,
            steps: strategy.steps(),
            current_step: 0,
            metrics: CutoverMetrics::default(),
            started_at: Utc::now(),
            completed_at: None,
            channel,
            rollback: None,
        };

        match self.cutovers.entry(id.clone()) {
            Entry::Occupied(existing) if existing.get().status.is_active() => {
                return Err(MigrationError::invalid_state(
                    Entity::Cutover,
                    id,
                    existing.get().status,
                    "initiate",
                ));
            }
            Entry::Occupied(mut existing) => {
                existing.insert(cutover.clone());
            }
            Entry::Vacant(slot) => {
                slot.insert(cutover.clone());
            }
        }

        tracing::info!(cutover_id = %id, %strategy, steps = cutover.steps.len(), "cutover initiated");
        Ok(cutover)
    }

    /// Snapshot of a cutover
    ///
    /// # Errors
    /// Not-found for an unknown id.
    pub fn get(&self, cutover_id: &str) -> Result<Cutover> {
        self.cutovers
            .get(cutover_id)
            .map(|c| c.value().clone())
            .ok_or_else(|| MigrationError::not_found(Entity::Cutover, cutover_id))
    }

    /// Execute exactly one step
    ///
    /// The channel goes `in_progress` with the first step and `completed`
    /// with the last; completing a parallel cutover decommissions legacy, so
    /// rollback is no longer available.
    ///
    /// # Errors
    /// Not-found for an unknown id; invalid-state once completed or rolled back.
    pub fn execute_next_step(&self, cutover_id: &str) -> Result<Cutover> {
        let mut entry = self
            .cutovers
            .get_mut(cutover_id)
            .ok_or_else(|| MigrationError::not_found(Entity::Cutover, cutover_id))?;
        let cutover = entry.value_mut();

        if !cutover.status.is_active() || cutover.current_step >= cutover.steps.len() {
            return Err(MigrationError::invalid_state(
                Entity::Cutover,
                cutover_id,
                cutover.status,
                "execute step of",
            ));
        }

        let now = Utc::now();
        let step = &mut cutover.steps[cutover.current_step];
        step.status = StepStatus::InProgress;
        step.started_at = Some(now);
        step.status = StepStatus::Completed;
        step.completed_at = Some(Utc::now());
        tracing::info!(cutover_id, step = step.step, name = %step.name, "cutover step completed");

        cutover.current_step += 1;
        cutover.channel.status = MigrationStatus::InProgress;

        if cutover.current_step >= cutover.steps.len() {
            let done = Utc::now();
            cutover.status = CutoverStatus::Completed;
            cutover.completed_at = Some(done);
            cutover.channel.status = MigrationStatus::Completed;
            cutover.channel.cutover_timestamp = Some(done);
            if cutover.strategy == CutoverStrategy::Parallel {
                cutover.channel.rollback_available = false;
            }
            cutover
                .channel
                .note(format!("Cutover ({}) completed at {}", cutover.strategy, done.to_rfc3339()));
            tracing::info!(cutover_id, strategy = %cutover.strategy, "cutover completed");
        } else {
            cutover.status = CutoverStatus::InProgress;
        }

        Ok(cutover.clone())
    }

    /// Replace the metrics of a cutover
    ///
    /// # Errors
    /// Not-found for an unknown id.
    pub fn record_metrics(&self, cutover_id: &str, metrics: CutoverMetrics) -> Result<()> {
        let mut entry = self
            .cutovers
            .get_mut(cutover_id)
            .ok_or_else(|| MigrationError::not_found(Entity::Cutover, cutover_id))?;
        entry.metrics = metrics;
        tracing::debug!(
            cutover_id,
            error_rate = metrics.error_rate,
            latency_ms = metrics.latency_ms,
            transactions = metrics.transaction_count,
            "cutover metrics recorded"
        );
        Ok(())
    }

    /// Evaluate metrics against the thresholds without mutating anything
    ///
    /// # Errors
    /// Not-found for an unknown id.
    pub fn monitor(&self, cutover_id: &str) -> Result<CutoverHealth> {
        let entry = self
            .cutovers
            .get(cutover_id)
            .ok_or_else(|| MigrationError::not_found(Entity::Cutover, cutover_id))?;
        let cutover = entry.value();
        let metrics = cutover.metrics;

        let mut warnings = Vec::new();
        if metrics.error_rate > self.thresholds.max_error_rate {
            warnings.push("Error rate above threshold".to_string());
        }
        if metrics.latency_ms > self.thresholds.max_latency_ms {
            warnings.push("Latency above threshold".to_string());
        }
        let health_status = if warnings.is_empty() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        Ok(CutoverHealth {
            cutover_id: cutover.cutover_id.clone(),
            status: cutover.status,
            health_status,
            metrics,
            warnings,
            step_progress: cutover.step_progress(),
        })
    }

    /// Revert the cutover to legacy
    ///
    /// Runs [`ROLLBACK_STEPS`] and marks the cutover and its channel
    /// `rolled_back`.
    ///
    /// # Errors
    /// Not-found for an unknown id; invalid-state when already rolled back or
    /// when legacy has been decommissioned.
    pub fn rollback(&self, cutover_id: &str, reason: &str) -> Result<RollbackRecord> {
        let mut entry = self
            .cutovers
            .get_mut(cutover_id)
            .ok_or_else(|| MigrationError::not_found(Entity::Cutover, cutover_id))?;
        let cutover = entry.value_mut();

        if cutover.status == CutoverStatus::RolledBack || !cutover.channel.rollback_available {
            return Err(MigrationError::invalid_state(
                Entity::Cutover,
                cutover_id,
                cutover.status,
                "roll back",
            ));
        }
        Ok(revert(cutover, reason))
    }

    /// Roll back the cutover only if it is still running
    ///
    /// Returns `None` for an unknown, finished or already reverted cutover.
    pub fn rollback_if_active(&self, cutover_id: &str, reason: &str) -> Option<RollbackRecord> {
        let mut entry = self.cutovers.get_mut(cutover_id)?;
        let cutover = entry.value_mut();
        if !cutover.status.is_active() || !cutover.channel.rollback_available {
            return None;
        }
        Some(revert(cutover, reason))
    }

    /// Roll back when [`monitor`](Self::monitor) reports degraded health
    ///
    /// Returns `None` while healthy or once the cutover is no longer active.
    ///
    /// # Errors
    /// As [`monitor`](Self::monitor) and [`rollback`](Self::rollback).
    pub fn rollback_if_degraded(&self, cutover_id: &str) -> Result<Option<RollbackRecord>> {
        let health = self.monitor(cutover_id)?;
        if health.health_status == HealthStatus::Healthy || !health.status.is_active() {
            return Ok(None);
        }
        let reason = format!("Automatic rollback: {}", health.warnings.join("; "));
        self.rollback(cutover_id, &reason).map(Some)
    }
}

fn revert(cutover: &mut Cutover, reason: &str) -> RollbackRecord {
    let mut record = RollbackRecord {
        cutover_id: cutover.cutover_id.clone(),
        reason: reason.to_string(),
        status: RollbackStatus::RollingBack,
        steps: ROLLBACK_STEPS.iter().map(ToString::to_string).collect(),
        rollback_initiated_at: Utc::now(),
        completed_at: None,
    };
    for step in &record.steps {
        tracing::debug!(cutover_id = %cutover.cutover_id, step = %step, "rollback step");
    }
    record.status = RollbackStatus::Completed;
    record.completed_at = Some(Utc::now());

    cutover.status = CutoverStatus::RolledBack;
    cutover.channel.status = MigrationStatus::RolledBack;
    cutover.channel.note(format!("Rolled back: {reason}"));
    cutover.rollback = Some(record.clone());

    tracing::warn!(cutover_id = %cutover.cutover_id, reason, "cutover rolled back");
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use mig_model::ChannelType;
    use pretty_assertions::assert_eq;

    fn ready_channel(id: &str) -> ChannelMigration {
        let mut cm = ChannelMigration::new(id, ChannelType::Edi);
        cm.status = MigrationStatus::Ready;
        cm
    }

    #[test]
    fn step_counts_per_strategy() {
        let counts: Vec<_> = [
            CutoverStrategy::Immediate,
            CutoverStrategy::Gradual,
            CutoverStrategy::Parallel,
            CutoverStrategy::Canary,
        ]
        .iter()
        .map(|s| s.step_templates().len())
        .collect();
        assert_eq!(counts, vec![3, 6, 5, 5]);
        assert_eq!("Canary".parse::<CutoverStrategy>().unwrap(), CutoverStrategy::Canary);
        assert!("blue-green".parse::<CutoverStrategy>().is_err());
    }

    #[test]
    fn initiate_builds_zeroed_cutover() {
        let coord = CutoverCoordinator::new();
        let cutover = coord.initiate(ready_channel("CH1"), CutoverStrategy::Gradual).unwrap();
        assert_eq!(cutover.cutover_id, "CUTOVER-CH1");
        assert_eq!(cutover.status, CutoverStatus::Initiated);
        assert_eq!(cutover.steps.len(), 6);
        assert_eq!(cutover.steps[0].name, "Route 10% traffic");
        assert_eq!(cutover.metrics, CutoverMetrics::default());
        assert_eq!(cutover.step_progress(), "0/6");
    }

    #[test]
    fn active_cutover_cannot_be_reinitiated() {
        let coord = CutoverCoordinator::new();
        coord.initiate(ready_channel("CH1"), CutoverStrategy::Immediate).unwrap();
        let err = coord.initiate(ready_channel("CH1"), CutoverStrategy::Canary).unwrap_err();
        assert!(matches!(err, MigrationError::InvalidState { .. }));

        for _ in 0..3 {
            coord.execute_next_step("CUTOVER-CH1").unwrap();
        }
        let replaced = coord.initiate(ready_channel("CH1"), CutoverStrategy::Canary).unwrap();
        assert_eq!(replaced.strategy, CutoverStrategy::Canary);
        assert_eq!(coord.len(), 1);
    }

    #[test]
    fn rolled_back_channel_is_rejected() {
        let mut cm = ready_channel("CH1");
        cm.status = MigrationStatus::RolledBack;
        let err = CutoverCoordinator::new().initiate(cm, CutoverStrategy::Immediate).unwrap_err();
        assert_eq!(err.context().get("entity"), Some("channel"));
    }

    #[test]
    fn steps_advance_to_completion() {
        let coord = CutoverCoordinator::new();
        coord.initiate(ready_channel("CH1"), CutoverStrategy::Immediate).unwrap();

        let c = coord.execute_next_step("CUTOVER-CH1").unwrap();
        assert_eq!(c.status, CutoverStatus::InProgress);
        assert_eq!(c.current_step, 1);
        assert_eq!(c.steps[0].status, StepStatus::Completed);
        assert!(c.steps[0].completed_at.is_some());
        assert_eq!(c.channel.status, MigrationStatus::InProgress);

        coord.execute_next_step("CUTOVER-CH1").unwrap();
        let c = coord.execute_next_step("CUTOVER-CH1").unwrap();
        assert_eq!(c.status, CutoverStatus::Completed);
        assert!(c.completed_at.is_some());
        assert_eq!(c.channel.status, MigrationStatus::Completed);
        assert!(c.channel.rollback_available);

        let err = coord.execute_next_step("CUTOVER-CH1").unwrap_err();
        assert!(matches!(err, MigrationError::InvalidState { .. }));
    }

    #[test]
    fn parallel_completion_decommissions_legacy() {
        let coord = CutoverCoordinator::new();
        coord.initiate(ready_channel("CH1"), CutoverStrategy::Parallel).unwrap();
        let mut last = None;
        for _ in 0..5 {
            last = Some(coord.execute_next_step("CUTOVER-CH1").unwrap());
        }
        let c = last.unwrap();
        assert!(!c.channel.rollback_available);
        assert!(coord.rollback("CUTOVER-CH1", "too late").is_err());
    }

    #[test]
    fn monitor_flags_thresholds_without_mutation() {
        let coord = CutoverCoordinator::new();
        coord.initiate(ready_channel("CH1"), CutoverStrategy::Gradual).unwrap();
        assert_eq!(coord.monitor("CUTOVER-CH1").unwrap().health_status, HealthStatus::Healthy);

        coord
            .record_metrics(
                "CUTOVER-CH1",
                CutoverMetrics {
                    error_rate: 7.5,
                    transaction_count: 400,
                    latency_ms: 1500.0,
                },
            )
            .unwrap();
        let before = coord.get("CUTOVER-CH1").unwrap();
        let health = coord.monitor("CUTOVER-CH1").unwrap();
        assert_eq!(health.health_status, HealthStatus::Degraded);
        assert_eq!(
            health.warnings,
            vec!["Error rate above threshold".to_string(), "Latency above threshold".to_string()]
        );
        assert_eq!(health.step_progress, "0/6");
        assert_eq!(coord.get("CUTOVER-CH1").unwrap(), before);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let coord = CutoverCoordinator::new();
        coord.initiate(ready_channel("CH1"), CutoverStrategy::Gradual).unwrap();
        coord
            .record_metrics(
                "CUTOVER-CH1",
                CutoverMetrics {
                    error_rate: 5.0,
                    transaction_count: 1,
                    latency_ms: 1000.0,
                },
            )
            .unwrap();
        assert_eq!(coord.monitor("CUTOVER-CH1").unwrap().health_status, HealthStatus::Healthy);
    }

    #[test]
    fn rollback_runs_script_and_marks_channel() {
        let coord = CutoverCoordinator::new();
        coord.initiate(ready_channel("CH1"), CutoverStrategy::Canary).unwrap();
        coord.execute_next_step("CUTOVER-CH1").unwrap();

        let record = coord.rollback("CUTOVER-CH1", "error spike").unwrap();
        assert_eq!(record.status, RollbackStatus::Completed);
        assert_eq!(record.steps.len(), 5);
        assert_eq!(record.steps[0], "Stop routing traffic to modern platform");

        let c = coord.get("CUTOVER-CH1").unwrap();
        assert_eq!(c.status, CutoverStatus::RolledBack);
        assert_eq!(c.channel.status, MigrationStatus::RolledBack);
        assert_eq!(c.channel.notes.last().map(String::as_str), Some("Rolled back: error spike"));
        assert!(coord.rollback("CUTOVER-CH1", "again").is_err());
    }

    #[test]
    fn degraded_health_triggers_rollback() {
        let coord = CutoverCoordinator::new();
        coord.initiate(ready_channel("CH1"), CutoverStrategy::Gradual).unwrap();
        assert_eq!(coord.rollback_if_degraded("CUTOVER-CH1").unwrap(), None);

        coord
            .record_metrics(
                "CUTOVER-CH1",
                CutoverMetrics {
                    error_rate: 12.0,
                    ..CutoverMetrics::default()
                },
            )
            .unwrap();
        let record = coord.rollback_if_degraded("CUTOVER-CH1").unwrap().unwrap();
        assert!(record.reason.contains("Error rate above threshold"));
        assert_eq!(coord.get("CUTOVER-CH1").unwrap().status, CutoverStatus::RolledBack);
    }

    #[test]
    fn plan_scoped_ids_do_not_collide() {
        let coord = CutoverCoordinator::new();
        let a = coord
            .initiate_in_plan(&PlanId::from("PLAN-A"), ready_channel("CH1"), CutoverStrategy::Immediate)
            .unwrap();
        let b = coord
            .initiate_in_plan(&PlanId::from("PLAN-B"), ready_channel("CH1"), CutoverStrategy::Immediate)
            .unwrap();
        assert_eq!(a.cutover_id, "CUTOVER-PLAN-A-CH1");
        assert_eq!(b.plan_id, Some(PlanId::from("PLAN-B")));
        assert_eq!(coord.len(), 2);
    }

    #[test]
    fn conditional_rollback_skips_finished_cutovers() {
        let coord = CutoverCoordinator::new();
        assert_eq!(coord.rollback_if_active("CUTOVER-X", "r"), None);

        coord.initiate(ready_channel("CH1"), CutoverStrategy::Immediate).unwrap();
        let record = coord.rollback_if_active("CUTOVER-CH1", "abort").unwrap();
        assert_eq!(record.cutover_id, "CUTOVER-CH1");
        assert_eq!(coord.get("CUTOVER-CH1").unwrap().status, CutoverStatus::RolledBack);
        assert_eq!(coord.rollback_if_active("CUTOVER-CH1", "again"), None);

        coord.initiate(ready_channel("CH2"), CutoverStrategy::Immediate).unwrap();
        for _ in 0..3 {
            coord.execute_next_step("CUTOVER-CH2").unwrap();
        }
        assert_eq!(coord.rollback_if_active("CUTOVER-CH2", "late"), None);
        assert_eq!(coord.get("CUTOVER-CH2").unwrap().status, CutoverStatus::Completed);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let coord = CutoverCoordinator::new();
        for err in [
            coord.execute_next_step("CUTOVER-X").unwrap_err(),
            coord.monitor("CUTOVER-X").unwrap_err(),
            coord.rollback("CUTOVER-X", "r").unwrap_err(),
            coord.record_metrics("CUTOVER-X", CutoverMetrics::default()).unwrap_err(),
            coord.get("CUTOVER-X").unwrap_err(),
        ] {
            assert!(err.to_string().contains("not found"));
        }
    }
}
