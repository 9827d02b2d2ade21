//! Thick client playbook

use crate::playbook::{Playbook, PlaybookKind, PlaybookStep};

/// Desktop application replacement playbook
#[derive(Debug, Clone, Default)]
pub struct ThickClientPlaybook {
    steps: Vec<PlaybookStep>,
}

impl ThickClientPlaybook {
    /// Create new playbook
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Playbook for ThickClientPlaybook {
    fn kind(&self) -> PlaybookKind {
        PlaybookKind::ThickClient
    }

    fn generate_steps(&mut self) -> &[PlaybookStep] {
        self.steps = vec![
            PlaybookStep::new(
                "CLIENT-01",
                "Application Assessment",
                "Analyze thick client architecture and dependencies",
                8,
                false,
            ),
            PlaybookStep::new(
                "CLIENT-02",
                "Develop Web/Cloud Alternative",
                "Build modern web or cloud-native alternative",
                80,
                false,
            ),
            PlaybookStep::new("CLIENT-03", "Data Migration", "Migrate local data to cloud storage", 16, true),
            PlaybookStep::new(
                "CLIENT-04",
                "User Acceptance Testing",
                "Conduct UAT with customer users",
                40,
                false,
            ),
            PlaybookStep::new("CLIENT-05", "Training", "Train customer users on new platform", 16, false),
            PlaybookStep::new(
                "CLIENT-06",
                "Deployment",
                "Deploy new application to customer users",
                8,
                false,
            ),
        ];
        &self.steps
    }

    fn steps(&self) -> &[PlaybookStep] {
        &self.steps
    }

    fn prerequisites(&self) -> &'static [&'static str] {
        &[
            "Thick client application documentation",
            "User workflow documentation",
            "Local data storage locations",
            "Integration points with other systems",
            "User access and permission requirements",
        ]
    }

    fn validation_checklist(&self) -> &'static [&'static str] {
        &[
            "All features functional in new application",
            "Data migrated completely and accurately",
            "User workflows validated",
            "Performance meets requirements",
            "Training materials prepared",
            "Support procedures documented",
        ]
    }

    fn rollback_plan(&self) -> &'static [&'static str] {
        &[
            "Re-enable legacy thick client access",
            "Restore local data from pre-migration snapshot",
            "Suspend rollout of the new application",
            "Notify users of temporary reversion",
            "Analyze failure logs for root cause",
        ]
    }
}
