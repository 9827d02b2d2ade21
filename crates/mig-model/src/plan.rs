//! Migration plans and per-channel migration records

use crate::customer::ChannelType;
use crate::error::ParseError;
use crate::status::MigrationStatus;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Migration plan identifier (`PLAN-<ulid>`, sortable by creation)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub String);

impl PlanId {
    /// Generate a new plan ID
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("PLAN-{}", Ulid::new()))
    }

    /// Borrow as `&str`
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlanId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlanId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Overall migration strategy of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MigrationStrategy {
    /// Channels migrated one after another
    #[default]
    #[serde(rename = "phased")]
    Phased,
    /// Everything switched in one window
    #[serde(rename = "big-bang")]
    BigBang,
    /// Legacy and modern run side by side
    #[serde(rename = "parallel")]
    Parallel,
}

impl MigrationStrategy {
    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationStrategy::Phased => "phased",
            MigrationStrategy::BigBang => "big-bang",
            MigrationStrategy::Parallel => "parallel",
        }
    }

    /// Planned `(start, completion)` for a plan created at `now`
    ///
    /// - phased: start now+7d, two weeks per channel (at least one channel's worth)
    /// - big-bang: start now+14d, three days
    /// - parallel: start now+7d, eight weeks
    #[must_use]
    pub fn timeline(&self, channel_count: usize, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            MigrationStrategy::Phased => {
                let start = now + Duration::days(7);
                let weeks = 2 * i64::try_from(channel_count.max(1)).unwrap_or(i64::MAX / 14);
                (start, start + Duration::weeks(weeks))
            }
            MigrationStrategy::BigBang => {
                let start = now + Duration::days(14);
                (start, start + Duration::days(3))
            }
            MigrationStrategy::Parallel => {
                let start = now + Duration::days(7);
                (start, start + Duration::weeks(8))
            }
        }
    }
}

impl fmt::Display for MigrationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MigrationStrategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phased" => Ok(Self::Phased),
            "big-bang" | "big_bang" | "bigbang" => Ok(Self::BigBang),
            "parallel" => Ok(Self::Parallel),
            _ => Err(ParseError::Strategy(s.to_string())),
        }
    }
}

/// Migration record for one channel, mutated as the plan progresses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMigration {
    /// Channel being migrated
    pub channel_id: String,
    /// Channel type
    pub channel_type: ChannelType,
    /// Current status
    pub status: MigrationStatus,
    /// Channel-level risk score (0-100)
    pub risk_score: f64,
    /// Assigned playbook
    pub playbook_id: Option<String>,
    /// Whether the last simulation passed
    pub simulation_passed: bool,
    /// When traffic was switched
    pub cutover_timestamp: Option<DateTime<Utc>>,
    /// Whether the legacy path can still be restored
    pub rollback_available: bool,
    /// Append-only notes
    pub notes: Vec<String>,
}

impl ChannelMigration {
    /// Create a pending record with rollback available
    #[inline]
    #[must_use]
    pub fn new(channel_id: impl Into<String>, channel_type: ChannelType) -> Self {
        Self {
            channel_id: channel_id.into(),
            channel_type,
            status: MigrationStatus::Pending,
            risk_score: 0.0,
            playbook_id: None,
            simulation_passed: false,
            cutover_timestamp: None,
            rollback_available: true,
            notes: Vec::new(),
        }
    }

    /// Append a note
    #[inline]
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}

/// Migration plan for one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationPlan {
    /// Plan identifier
    pub plan_id: PlanId,
    /// Customer being migrated
    pub customer_id: String,
    /// Customer display name
    pub customer_name: String,
    /// Overall status
    pub overall_status: MigrationStatus,
    /// Per-channel records, in customer channel order
    pub channel_migrations: Vec<ChannelMigration>,
    /// Customer-level risk score at creation time
    pub overall_risk_score: f64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Planned start
    pub planned_start: Option<DateTime<Utc>>,
    /// Planned completion
    pub planned_completion: Option<DateTime<Utc>>,
    /// First execution
    pub actual_start: Option<DateTime<Utc>>,
    /// Completion of the last channel
    pub actual_completion: Option<DateTime<Utc>>,
    /// Chosen strategy
    pub migration_strategy: MigrationStrategy,
}

impl MigrationPlan {
    /// Mean progress weight over channels; 0 for a plan without channels
    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        if self.channel_migrations.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .channel_migrations
            .iter()
            .map(|cm| cm.status.progress_weight())
            .sum();
        total / self.channel_migrations.len() as f64
    }

    /// Look up a channel record
    #[must_use]
    pub fn channel(&self, channel_id: &str) -> Option<&ChannelMigration> {
        self.channel_migrations.iter().find(|cm| cm.channel_id == channel_id)
    }

    /// Look up a channel record mutably
    pub fn channel_mut(&mut self, channel_id: &str) -> Option<&mut ChannelMigration> {
        self.channel_migrations.iter_mut().find(|cm| cm.channel_id == channel_id)
    }

    /// Whether every channel has reached `status`
    #[must_use]
    pub fn all_channels(&self, status: MigrationStatus) -> bool {
        self.channel_migrations.iter().all(|cm| cm.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plan_with(statuses: &[MigrationStatus]) -> MigrationPlan {
        MigrationPlan {
            plan_id: PlanId::generate(),
            customer_id: "C1".into(),
            customer_name: "Acme".into(),
            overall_status: MigrationStatus::Planning,
            channel_migrations: statuses
                .iter()
                .enumerate()
                .map(|(i, st)| {
                    let mut cm = ChannelMigration::new(format!("CH{i}"), ChannelType::RestApi);
                    cm.status = *st;
                    cm
                })
                .collect(),
            overall_risk_score: 0.0,
            created_at: Utc::now(),
            planned_start: None,
            planned_completion: None,
            actual_start: None,
            actual_completion: None,
            migration_strategy: MigrationStrategy::Phased,
        }
    }

    #[test]
    fn plan_ids_are_prefixed_and_unique() {
        let a = PlanId::generate();
        let b = PlanId::generate();
        assert!(a.as_str().starts_with("PLAN-"));
        assert_ne!(a, b);
    }

    #[test]
    fn strategy_parse() {
        assert_eq!("big-bang".parse::<MigrationStrategy>().unwrap(), MigrationStrategy::BigBang);
        assert_eq!("Phased".parse::<MigrationStrategy>().unwrap(), MigrationStrategy::Phased);
        assert!("waterfall".parse::<MigrationStrategy>().is_err());
        assert_eq!(
            serde_json::to_string(&MigrationStrategy::BigBang).unwrap(),
            "\"big-bang\""
        );
    }

    #[test]
    fn timelines_match_strategy() {
        let now = Utc::now();
        let (start, end) = MigrationStrategy::Phased.timeline(3, now);
        assert_eq!(start - now, Duration::days(7));
        assert_eq!(end - start, Duration::weeks(6));

        let (start, end) = MigrationStrategy::BigBang.timeline(3, now);
        assert_eq!(start - now, Duration::days(14));
        assert_eq!(end - start, Duration::days(3));

        let (start, end) = MigrationStrategy::Parallel.timeline(3, now);
        assert_eq!(end - start, Duration::weeks(8));
    }

    #[test]
    fn progress_is_mean_of_weights() {
        let plan = plan_with(&[MigrationStatus::Completed, MigrationStatus::Ready]);
        assert_eq!(plan.progress_percentage(), 80.0);
        assert_eq!(plan_with(&[]).progress_percentage(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_completion_after_start(n in 0usize..50) {
            let now = Utc::now();
            for strategy in [MigrationStrategy::Phased, MigrationStrategy::BigBang, MigrationStrategy::Parallel] {
                let (start, end) = strategy.timeline(n, now);
                prop_assert!(end > start);
            }
        }

        #[test]
        fn prop_phased_longer_than_big_bang(n in 1usize..50) {
            let now = Utc::now();
            let (ps, pe) = MigrationStrategy::Phased.timeline(n, now);
            let (bs, be) = MigrationStrategy::BigBang.timeline(n, now);
            prop_assert!(pe - ps > be - bs);
        }
    }
}
