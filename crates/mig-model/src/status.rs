//! Migration status state machine
//!
//! Plans and channel migrations share one status vocabulary. The happy path is
//! `pending → planning → risk_assessment → simulation → ready → in_progress → completed`;
//! `failed` and `rolled_back` are reachable from any non-terminal state.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a migration plan or a single channel migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    /// Not yet planned
    #[default]
    Pending,
    /// Plan drafted
    Planning,
    /// Risk assessment underway
    RiskAssessment,
    /// Simulations running or failed
    Simulation,
    /// All simulations passed, executable
    Ready,
    /// Cutover executing
    InProgress,
    /// Migrated
    Completed,
    /// Migration failed
    Failed,
    /// Reverted to legacy
    RolledBack,
}

impl MigrationStatus {
    /// Every status, in phase order
    pub const ALL: [MigrationStatus; 9] = [
        MigrationStatus::Pending,
        MigrationStatus::Planning,
        MigrationStatus::RiskAssessment,
        MigrationStatus::Simulation,
        MigrationStatus::Ready,
        MigrationStatus::InProgress,
        MigrationStatus::Completed,
        MigrationStatus::Failed,
        MigrationStatus::RolledBack,
    ];

    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationStatus::Pending => "pending",
            MigrationStatus::Planning => "planning",
            MigrationStatus::RiskAssessment => "risk_assessment",
            MigrationStatus::Simulation => "simulation",
            MigrationStatus::Ready => "ready",
            MigrationStatus::InProgress => "in_progress",
            MigrationStatus::Completed => "completed",
            MigrationStatus::Failed => "failed",
            MigrationStatus::RolledBack => "rolled_back",
        }
    }

    /// Progress contribution of a channel in this status, in percent
    #[inline]
    #[must_use]
    pub fn progress_weight(&self) -> f64 {
        match self {
            MigrationStatus::Pending
            | MigrationStatus::Failed
            | MigrationStatus::RolledBack => 0.0,
            MigrationStatus::Planning => 10.0,
            MigrationStatus::RiskAssessment => 20.0,
            MigrationStatus::Simulation => 40.0,
            MigrationStatus::Ready => 60.0,
            MigrationStatus::InProgress => 80.0,
            MigrationStatus::Completed => 100.0,
        }
    }

    /// Whether no further forward progress is possible
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MigrationStatus::Completed | MigrationStatus::Failed | MigrationStatus::RolledBack
        )
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MigrationStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MigrationStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseError::Status(s.to_string()))
    }
}

/// Legal successor states of `from`
#[must_use]
pub fn allowed_transitions(from: MigrationStatus) -> Vec<MigrationStatus> {
    use MigrationStatus::*;
    match from {
        Pending => vec![Planning, RiskAssessment, Failed, RolledBack],
        Planning => vec![RiskAssessment, Simulation, Failed, RolledBack],
        RiskAssessment => vec![Simulation, Failed, RolledBack],
        Simulation => vec![Simulation, Ready, Failed, RolledBack],
        Ready => vec![Simulation, InProgress, Failed, RolledBack],
        // A partially executed plan returns to ready for the next channel
        InProgress => vec![Ready, Completed, Failed, RolledBack],
        Completed => vec![RolledBack],
        Failed => vec![RolledBack],
        RolledBack => vec![RolledBack],
    }
}

/// Check that `from → to` is a legal edge
///
/// # Errors
/// Returns `(from, to)` when the edge is not in the transition table.
pub fn validate_transition(
    from: MigrationStatus,
    to: MigrationStatus,
) -> Result<(), (MigrationStatus, MigrationStatus)> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_legal() {
        use MigrationStatus::*;
        let path = [Pending, Planning, RiskAssessment, Simulation, Ready, InProgress, Completed];
        for pair in path.windows(2) {
            assert!(validate_transition(pair[0], pair[1]).is_ok(), "{:?}", pair);
        }
    }

    #[test]
    fn cannot_skip_simulation() {
        assert!(validate_transition(MigrationStatus::Planning, MigrationStatus::Ready).is_err());
        assert!(validate_transition(MigrationStatus::Planning, MigrationStatus::InProgress).is_err());
    }

    #[test]
    fn rollback_reachable_from_everywhere() {
        for from in MigrationStatus::ALL {
            assert!(validate_transition(from, MigrationStatus::RolledBack).is_ok(), "{from}");
        }
    }

    #[test]
    fn progress_weights() {
        assert_eq!(MigrationStatus::Planning.progress_weight(), 10.0);
        assert_eq!(MigrationStatus::Ready.progress_weight(), 60.0);
        assert_eq!(MigrationStatus::RolledBack.progress_weight(), 0.0);
    }

    #[test]
    fn status_serde_matches_display() {
        for st in MigrationStatus::ALL {
            let json = serde_json::to_string(&st).unwrap();
            assert_eq!(json, format!("\"{st}\""));
            assert_eq!(st.as_str().parse::<MigrationStatus>().unwrap(), st);
        }
    }
}
