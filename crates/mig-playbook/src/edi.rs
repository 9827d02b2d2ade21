//! EDI playbook (X12, EDIFACT)

use crate::playbook::{Playbook, PlaybookKind, PlaybookStep};
use mig_model::IntegrationChannel;

const DEFAULT_PROTOCOL: &str = "X12";

/// EDI migration playbook
///
/// Interpolates the channel's `protocol` setting (default `X12`) into the
/// inventory and mapping step descriptions.
#[derive(Debug, Clone)]
pub struct EdiPlaybook {
    protocol: String,
    steps: Vec<PlaybookStep>,
}

impl EdiPlaybook {
    /// Create playbook for a channel
    #[must_use]
    pub fn for_channel(channel: &IntegrationChannel) -> Self {
        Self {
            protocol: channel.config_str("protocol").unwrap_or(DEFAULT_PROTOCOL).to_string(),
            steps: Vec::new(),
        }
    }

    /// Protocol in use
    #[inline]
    #[must_use]
    pub fn protocol(&self) -> &str {
        &self.protocol
    }
}

impl Playbook for EdiPlaybook {
    fn kind(&self) -> PlaybookKind {
        PlaybookKind::Edi
    }

    fn generate_steps(&mut self) -> &[PlaybookStep] {
        let protocol = &self.protocol;
        self.steps = vec![
            PlaybookStep::new(
                "EDI-01",
                "Inventory EDI Documents",
                format!("Catalog all {protocol} document types and transaction sets"),
                4,
                true,
            ),
            PlaybookStep::new(
                "EDI-02",
                "Map EDI Segments",
                format!("Map {protocol} segments to modern API data structures"),
                16,
                false,
            ),
            PlaybookStep::new(
                "EDI-03",
                "Configure Translation Rules",
                "Set up EDI translation and validation rules",
                8,
                false,
            ),
            PlaybookStep::new(
                "EDI-04",
                "Test EDI Transactions",
                "Validate sample EDI transactions through new platform",
                12,
                true,
            ),
            PlaybookStep::new(
                "EDI-05",
                "Configure Trading Partner",
                "Set up trading partner configuration in new system",
                4,
                false,
            ),
            PlaybookStep::new(
                "EDI-06",
                "Parallel Testing",
                "Run parallel EDI processing in both systems",
                40,
                true,
            ),
            PlaybookStep::new("EDI-07", "Cutover Execution", "Switch EDI traffic to new platform", 2, false),
        ];
        &self.steps
    }

    fn steps(&self) -> &[PlaybookStep] {
        &self.steps
    }

    fn prerequisites(&self) -> &'static [&'static str] {
        &[
            "EDI document specifications and trading partner agreements",
            "Sample EDI files for each transaction type",
            "Legacy EDI gateway configuration",
            "Trading partner contact information",
            "EDI compliance requirements",
        ]
    }

    fn validation_checklist(&self) -> &'static [&'static str] {
        &[
            "All EDI document types mapped correctly",
            "Segment translations validated",
            "Acknowledgments (997/999) working properly",
            "Error handling and logging configured",
            "Trading partner connectivity verified",
            "Compliance rules validated",
        ]
    }

    fn rollback_plan(&self) -> &'static [&'static str] {
        &[
            "Revert trading partner routing to legacy gateway",
            "Disable new EDI endpoint",
            "Restore legacy EDI processing",
            "Notify trading partners of temporary reversion",
            "Analyze failure logs for root cause",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mig_model::ChannelType;

    #[test]
    fn protocol_is_interpolated() {
        let channel = IntegrationChannel::new("E1", ChannelType::Edi, "EDI").with_config("protocol", "EDIFACT");
        let mut playbook = EdiPlaybook::for_channel(&channel);
        let steps = playbook.generate_steps();
        assert_eq!(steps[0].description, "Catalog all EDIFACT document types and transaction sets");
        assert_eq!(steps[1].description, "Map EDIFACT segments to modern API data structures");
    }

    #[test]
    fn defaults_to_x12() {
        let channel = IntegrationChannel::new("E1", ChannelType::Edi, "EDI");
        let mut playbook = EdiPlaybook::for_channel(&channel);
        assert_eq!(playbook.protocol(), "X12");
        assert!(playbook.steps().is_empty());
        playbook.generate_steps();
        assert_eq!(playbook.steps().len(), 7);
        assert_eq!(playbook.total_estimated_hours(), 86);
    }
}
