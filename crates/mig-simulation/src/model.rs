//! Simulation records

use chrono::{DateTime, Utc};
use mig_model::ChannelType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fmt::Write as _;

/// Default minimum success rate for a passing simulation
pub const DEFAULT_PASS_THRESHOLD: f64 = 95.0;

/// Status of a simulation or a single scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    /// Created, not yet executed
    #[default]
    Pending,
    /// Executing
    Running,
    /// Success rate at or above threshold
    Passed,
    /// Success rate below threshold
    Failed,
    /// Stopped before completion
    Aborted,
}

impl SimulationStatus {
    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationStatus::Pending => "pending",
            SimulationStatus::Running => "running",
            SimulationStatus::Passed => "passed",
            SimulationStatus::Failed => "failed",
            SimulationStatus::Aborted => "aborted",
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScenario {
    /// `SCEN-{channel_id}-{nn}`
    pub scenario_id: String,
    /// Template name
    pub name: String,
    /// What is exercised
    pub description: String,
    /// Channel type the scenario belongs to
    pub channel_type: ChannelType,
    /// Input sent to both systems
    pub test_data: Value,
    /// Expected outcome
    pub expected_results: Value,
    /// Validation rule labels
    pub validation_rules: Vec<String>,
}

/// Outcome of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// `RESULT-xxxxxxxx`
    pub result_id: String,
    /// Scenario this result belongs to
    pub scenario_id: String,
    /// Passed or failed
    pub status: SimulationStatus,
    /// No differences found
    pub success: bool,
    /// Wall-clock execution time
    pub execution_time_ms: u64,
    /// Legacy response
    pub legacy_output: Value,
    /// Modern response
    pub modern_output: Value,
    /// Differences between the two
    pub differences: Vec<String>,
    /// Errors raised while comparing
    pub errors: Vec<String>,
    /// Non-fatal observations
    pub warnings: Vec<String>,
    /// When the scenario finished
    pub executed_at: DateTime<Utc>,
}

/// A channel simulation: scenarios and, once executed, their results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationSimulation {
    /// `SIM-xxxxxxxx`
    pub simulation_id: String,
    /// Customer owning the channel
    pub customer_id: String,
    /// Channel under test
    pub channel_id: String,
    /// Scenarios in template order
    pub scenarios: Vec<TestScenario>,
    /// Results, parallel to `scenarios`
    pub results: Vec<SimulationResult>,
    /// Aggregate status
    pub overall_status: SimulationStatus,
    /// Percentage of scenarios without differences
    pub success_rate: f64,
    /// Minimum success rate required to pass
    pub pass_threshold: f64,
    /// Execution start
    pub started_at: Option<DateTime<Utc>>,
    /// Execution end
    pub completed_at: Option<DateTime<Utc>>,
}

impl MigrationSimulation {
    /// Status is passed and the success rate meets the threshold
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.overall_status == SimulationStatus::Passed && self.success_rate >= self.pass_threshold
    }

    /// Number of scenarios that succeeded
    #[must_use]
    pub fn successful_scenarios(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of scenarios that failed
    #[must_use]
    pub fn failed_scenarios(&self) -> usize {
        self.results.len() - self.successful_scenarios()
    }

    /// Whether the simulation has been executed
    #[inline]
    #[must_use]
    pub fn is_executed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Plain-text summary
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "=== Simulation {} ===", self.simulation_id);
        let _ = writeln!(report, "Customer: {}", self.customer_id);
        let _ = writeln!(report, "Channel: {}", self.channel_id);
        let _ = writeln!(report, "Scenarios: {}", self.scenarios.len());
        let _ = writeln!(report, "Succeeded: {}", self.successful_scenarios());
        let _ = writeln!(report, "Failed: {}", self.failed_scenarios());
        let _ = writeln!(report, "Success Rate: {:.1}%", self.success_rate);

        let failures: Vec<_> = self.results.iter().filter(|r| !r.success).collect();
        if !failures.is_empty() {
            report.push_str("\n=== Differences ===\n");
            for r in failures {
                let _ = writeln!(report, "{}: {}", r.scenario_id, r.differences.join("; "));
            }
        }

        let _ = writeln!(
            report,
            "\n=== Result: {} ===",
            if self.passed() { "PASS" } else { "FAIL" }
        );
        report
    }
}
