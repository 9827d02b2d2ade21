//! Legacy and modern response generation
//!
//! The engine asks one [`ResponseGenerator`] per side for a response to each
//! scenario. [`MirrorResponder`] echoes the scenario's test data, so two mirrors
//! always agree; [`DivergentResponder`] injects a defect for selected scenarios.

use crate::model::TestScenario;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Status reported by a healthy responder
pub const STATUS_SUCCESS: &str = "success";

/// Which system produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemSide {
    /// System being migrated away from
    Legacy,
    /// Target platform
    Modern,
}

impl SystemSide {
    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemSide::Legacy => "legacy",
            SystemSide::Modern => "modern",
        }
    }
}

impl fmt::Display for SystemSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of one system to one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemResponse {
    /// Outcome label
    pub status: String,
    /// Response body
    pub payload: Value,
    /// Producing side
    pub source: SystemSide,
    /// When the response was produced; not compared
    pub timestamp: DateTime<Utc>,
}

impl SystemResponse {
    /// Serialize as `{status, data, timestamp, source}`
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "status": self.status,
            "data": self.payload,
            "timestamp": self.timestamp.to_rfc3339(),
            "source": self.source,
        })
    }
}

/// Produces a system's response to a scenario
pub trait ResponseGenerator: Send + Sync + fmt::Debug {
    /// Respond to `scenario` as `side`
    fn respond(&self, scenario: &TestScenario, side: SystemSide) -> SystemResponse;
}

/// Echoes the scenario's test data with a success status
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorResponder;

impl ResponseGenerator for MirrorResponder {
    fn respond(&self, scenario: &TestScenario, side: SystemSide) -> SystemResponse {
        SystemResponse {
            status: STATUS_SUCCESS.to_string(),
            payload: scenario.test_data.clone(),
            source: side,
            timestamp: Utc::now(),
        }
    }
}

/// A defect injected into a response
#[derive(Debug, Clone, PartialEq)]
pub enum Divergence {
    /// Replace the status
    Status(String),
    /// Replace the whole payload
    Payload(Value),
    /// Set one top-level payload field
    Field(String, Value),
}

/// Wraps another responder and alters responses for selected scenarios
///
/// Scenarios are matched by scenario id or by template name.
#[derive(Debug, Clone)]
pub struct DivergentResponder {
    inner: Arc<dyn ResponseGenerator>,
    divergences: HashMap<String, Divergence>,
}

impl Default for DivergentResponder {
    fn default() -> Self {
        Self::new(Arc::new(MirrorResponder))
    }
}

impl DivergentResponder {
    /// Create new responder around `inner`
    #[inline]
    #[must_use]
    pub fn new(inner: Arc<dyn ResponseGenerator>) -> Self {
        Self {
            inner,
            divergences: HashMap::new(),
        }
    }

    /// Inject `divergence` for the scenario with this id or name
    #[must_use]
    pub fn diverge(mut self, scenario: impl Into<String>, divergence: Divergence) -> Self {
        self.divergences.insert(scenario.into(), divergence);
        self
    }

    fn divergence_for(&self, scenario: &TestScenario) -> Option<&Divergence> {
        self.divergences
            .get(&scenario.scenario_id)
            .or_else(|| self.divergences.get(&scenario.name))
    }
}

impl ResponseGenerator for DivergentResponder {
    fn respond(&self, scenario: &TestScenario, side: SystemSide) -> SystemResponse {
        let mut response = self.inner.respond(scenario, side);
        match self.divergence_for(scenario) {
            Some(Divergence::Status(status)) => response.status.clone_from(status),
            Some(Divergence::Payload(payload)) => response.payload = payload.clone(),
            Some(Divergence::Field(key, value)) => {
                if let Value::Object(map) = &mut response.payload {
                    map.insert(key.clone(), value.clone());
                } else {
                    let mut map = serde_json::Map::new();
                    map.insert(key.clone(), value.clone());
                    response.payload = Value::Object(map);
                }
            }
            None => {}
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mig_model::ChannelType;
    use serde_json::json;

    fn scenario() -> TestScenario {
        TestScenario {
            scenario_id: "SCEN-CH-01".into(),
            name: "File Upload".into(),
            description: "upload".into(),
            channel_type: ChannelType::Sftp,
            test_data: json!({"filename": "a.csv", "records": 100}),
            expected_results: json!({}),
            validation_rules: vec![],
        }
    }

    #[test]
    fn mirror_echoes_test_data() {
        let r = MirrorResponder.respond(&scenario(), SystemSide::Legacy);
        assert_eq!(r.status, STATUS_SUCCESS);
        assert_eq!(r.payload, scenario().test_data);
        assert_eq!(r.to_value()["source"], "legacy");
    }

    #[test]
    fn divergence_matches_by_name_or_id() {
        let by_name = DivergentResponder::default().diverge("File Upload", Divergence::Field("records".into(), json!(99)));
        assert_eq!(by_name.respond(&scenario(), SystemSide::Modern).payload["records"], 99);

        let by_id = DivergentResponder::default().diverge("SCEN-CH-01", Divergence::Status("error".into()));
        assert_eq!(by_id.respond(&scenario(), SystemSide::Modern).status, "error");

        let other = DivergentResponder::default().diverge("File Download", Divergence::Payload(json!(null)));
        assert_eq!(other.respond(&scenario(), SystemSide::Modern).payload, scenario().test_data);
    }
}
