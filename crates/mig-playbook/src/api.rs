//! API playbook (REST, SOAP, web portal)

use crate::playbook::{Playbook, PlaybookKind, PlaybookStep};
use mig_model::IntegrationChannel;

const DEFAULT_API_TYPE: &str = "REST";

/// API migration playbook
///
/// The channel's `api_type` setting (default `REST`) is interpolated into the
/// contract analysis step.
#[derive(Debug, Clone)]
pub struct ApiPlaybook {
    api_type: String,
    steps: Vec<PlaybookStep>,
}

impl ApiPlaybook {
    /// Create playbook for a channel
    #[must_use]
    pub fn for_channel(channel: &IntegrationChannel) -> Self {
        Self {
            api_type: channel.config_str("api_type").unwrap_or(DEFAULT_API_TYPE).to_string(),
            steps: Vec::new(),
        }
    }

    /// API flavour in use
    #[inline]
    #[must_use]
    pub fn api_type(&self) -> &str {
        &self.api_type
    }
}

impl Playbook for ApiPlaybook {
    fn kind(&self) -> PlaybookKind {
        PlaybookKind::Api
    }

    fn generate_steps(&mut self) -> &[PlaybookStep] {
        let api_type = &self.api_type;
        self.steps = vec![
            PlaybookStep::new(
                "API-01",
                "API Contract Analysis",
                format!("Analyze {api_type} API contracts and endpoints"),
                4,
                true,
            ),
            PlaybookStep::new("API-02", "Map Endpoints", "Map legacy endpoints to new API", 8, false),
            PlaybookStep::new(
                "API-03",
                "Implement Adapters",
                "Create compatibility adapters if needed",
                16,
                false,
            ),
            PlaybookStep::new(
                "API-04",
                "Test API Calls",
                "Validate all API endpoints with test data",
                12,
                true,
            ),
            PlaybookStep::new(
                "API-05",
                "Update API Documentation",
                "Provide updated API documentation to customer",
                4,
                false,
            ),
            PlaybookStep::new(
                "API-06",
                "Phased Rollout",
                "Gradually route API traffic to new platform",
                8,
                true,
            ),
        ];
        &self.steps
    }

    fn steps(&self) -> &[PlaybookStep] {
        &self.steps
    }

    fn prerequisites(&self) -> &'static [&'static str] {
        &[
            "API documentation (OpenAPI/Swagger spec)",
            "Authentication mechanism details",
            "Rate limiting and throttling requirements",
            "Sample request/response payloads",
            "Error handling requirements",
        ]
    }

    fn validation_checklist(&self) -> &'static [&'static str] {
        &[
            "All endpoints responding correctly",
            "Authentication working properly",
            "Request/response schemas validated",
            "Error responses consistent",
            "Rate limiting configured",
            "API versioning strategy implemented",
        ]
    }

    fn rollback_plan(&self) -> &'static [&'static str] {
        &[
            "Route API traffic back to legacy endpoints",
            "Disable new API gateway routes",
            "Restore legacy API credentials",
            "Notify API consumers of temporary reversion",
            "Analyze failure logs for root cause",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mig_model::ChannelType;

    #[test]
    fn api_type_is_interpolated() {
        let channel = IntegrationChannel::new("S1", ChannelType::SoapApi, "Legacy WS").with_config("api_type", "SOAP");
        let mut playbook = ApiPlaybook::for_channel(&channel);
        assert_eq!(playbook.generate_steps()[0].description, "Analyze SOAP API contracts and endpoints");
        assert_eq!(playbook.total_estimated_hours(), 52);
    }

    #[test]
    fn non_string_config_falls_back() {
        let channel = IntegrationChannel::new("R1", ChannelType::RestApi, "API").with_config("api_type", 3);
        assert_eq!(ApiPlaybook::for_channel(&channel).api_type(), "REST");
    }
}
