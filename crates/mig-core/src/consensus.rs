//! Weighted consensus gate
//!
//! Decisions are put to the participants whose role is relevant to the
//! decision kind. Voting policy is supplied by a [`VoteProvider`]; this module
//! only tallies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Default weighted approval required
pub const DEFAULT_CONSENSUS_THRESHOLD: f64 = 0.66;

/// Participant role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Overall coordination
    Coordinator,
    /// Source data analysis
    DataAnalyzer,
    /// Schema mapping
    SchemaMapper,
    /// Data movement
    DataMigrator,
    /// Result validation
    Validator,
    /// Risk scoring
    RiskAssessor,
    /// Rollback execution
    RollbackManager,
}

/// What is being decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// Target schema change
    SchemaChange,
    /// Start moving data
    DataMigration,
    /// Revert a migration
    Rollback,
}

impl DecisionKind {
    /// Roles that vote on this kind
    #[must_use]
    pub fn relevant_roles(&self) -> &'static [AgentRole] {
        match self {
            DecisionKind::SchemaChange => &[AgentRole::SchemaMapper, AgentRole::Validator],
            DecisionKind::DataMigration => &[AgentRole::DataMigrator, AgentRole::Validator],
            DecisionKind::Rollback => &[AgentRole::RollbackManager, AgentRole::RiskAssessor],
        }
    }

    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::SchemaChange => "schema_change",
            DecisionKind::DataMigration => "data_migration",
            DecisionKind::Rollback => "rollback",
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision put to vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Kind
    pub kind: DecisionKind,
    /// Free-form details
    pub details: Value,
}

impl Decision {
    /// Create decision without details
    #[inline]
    #[must_use]
    pub fn new(kind: DecisionKind) -> Self {
        Self {
            kind,
            details: Value::Null,
        }
    }

    /// With details
    #[inline]
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}

/// A voter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant id
    pub id: String,
    /// Role
    pub role: AgentRole,
    /// Vote weight; negative weights count as zero
    pub weight: f64,
}

impl Participant {
    /// Create participant with weight 1
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, role: AgentRole) -> Self {
        Self {
            id: id.into(),
            role,
            weight: 1.0,
        }
    }

    /// With weight
    #[inline]
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Source of votes
#[async_trait]
pub trait VoteProvider: Send + Sync {
    /// Whether `participant` approves `decision`
    async fn vote(&self, participant: &Participant, decision: &Decision) -> bool;
}

/// Tally of one decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    /// Decision kind
    pub kind: DecisionKind,
    /// Weighted approval met the threshold
    pub approved: bool,
    /// Approving weight over relevant weight; 0 without relevant weight
    pub approval_rate: f64,
    /// `(participant id, vote)` in participant order
    pub votes: Vec<(String, bool)>,
}

/// Puts decisions to relevant participants
#[derive(Clone)]
pub struct ConsensusCoordinator {
    participants: Vec<Participant>,
    threshold: f64,
    provider: Arc<dyn VoteProvider>,
}

impl fmt::Debug for ConsensusCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsensusCoordinator")
            .field("participants", &self.participants)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl ConsensusCoordinator {
    /// Create coordinator with the default threshold and no participants
    #[inline]
    #[must_use]
    pub fn new(provider: Arc<dyn VoteProvider>) -> Self {
        Self {
            participants: Vec::new(),
            threshold: DEFAULT_CONSENSUS_THRESHOLD,
            provider,
        }
    }

    /// With threshold
    #[inline]
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// With an additional participant
    #[inline]
    #[must_use]
    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    /// Registered participants
    #[inline]
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Tally a decision; no relevant participants means not approved
    pub async fn decide(&self, decision: &Decision) -> ConsensusOutcome {
        let relevant: Vec<&Participant> = self
            .participants
            .iter()
            .filter(|p| decision.kind.relevant_roles().contains(&p.role))
            .collect();

        let votes = futures::future::join_all(relevant.iter().map(|p| self.provider.vote(p, decision))).await;

        let total: f64 = relevant.iter().map(|p| p.weight.max(0.0)).sum();
        let approving: f64 = relevant
            .iter()
            .zip(&votes)
            .filter(|(_, v)| **v)
            .map(|(p, _)| p.weight.max(0.0))
            .sum();
        let approval_rate = if total > 0.0 { approving / total } else { 0.0 };
        let approved = total > 0.0 && approval_rate >= self.threshold;

        tracing::info!(
            decision = %decision.kind,
            voters = relevant.len(),
            approval_rate,
            approved,
            "consensus result"
        );

        ConsensusOutcome {
            kind: decision.kind,
            approved,
            approval_rate,
            votes: relevant.iter().map(|p| p.id.clone()).zip(votes).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Approves unless the participant id is in the deny set
    struct FixedVotes(HashSet<&'static str>);

    #[async_trait]
    impl VoteProvider for FixedVotes {
        async fn vote(&self, participant: &Participant, _decision: &Decision) -> bool {
            !self.0.contains(participant.id.as_str())
        }
    }

    fn coordinator(deny: &[&'static str]) -> ConsensusCoordinator {
        ConsensusCoordinator::new(Arc::new(FixedVotes(deny.iter().copied().collect())))
            .with_participant(Participant::new("mapper", AgentRole::SchemaMapper))
            .with_participant(Participant::new("migrator", AgentRole::DataMigrator).with_weight(2.0))
            .with_participant(Participant::new("validator", AgentRole::Validator))
            .with_participant(Participant::new("analyzer", AgentRole::DataAnalyzer))
    }

    #[tokio::test]
    async fn only_relevant_roles_vote() {
        let outcome = coordinator(&[]).decide(&Decision::new(DecisionKind::DataMigration)).await;
        assert!(outcome.approved);
        let ids: Vec<_> = outcome.votes.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["migrator", "validator"]);
    }

    #[tokio::test]
    async fn weights_decide_the_outcome() {
        let outcome = coordinator(&["validator"]).decide(&Decision::new(DecisionKind::DataMigration)).await;
        assert!((outcome.approval_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!(outcome.approved);

        let outcome = coordinator(&["migrator"]).decide(&Decision::new(DecisionKind::DataMigration)).await;
        assert!(!outcome.approved);
    }

    #[test]
    fn no_relevant_participants_rejects() {
        let outcome = tokio_test::block_on(coordinator(&[]).decide(&Decision::new(DecisionKind::Rollback)));
        assert!(!outcome.approved);
        assert!(outcome.votes.is_empty());
        assert_eq!(outcome.approval_rate, 0.0);
    }
}
