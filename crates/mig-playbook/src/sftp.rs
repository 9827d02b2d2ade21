//! SFTP playbook

use crate::playbook::{Playbook, PlaybookKind, PlaybookStep};

/// File-transfer migration playbook
#[derive(Debug, Clone, Default)]
pub struct SftpPlaybook {
    steps: Vec<PlaybookStep>,
}

impl SftpPlaybook {
    /// Create new playbook
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Playbook for SftpPlaybook {
    fn kind(&self) -> PlaybookKind {
        PlaybookKind::Sftp
    }

    fn generate_steps(&mut self) -> &[PlaybookStep] {
        self.steps = vec![
            PlaybookStep::new(
                "SFTP-01",
                "Inventory File Patterns",
                "Catalog all file patterns, formats, and schedules",
                2,
                true,
            ),
            PlaybookStep::new(
                "SFTP-02",
                "Configure New SFTP Server",
                "Set up SFTP server and user accounts",
                4,
                false,
            ),
            PlaybookStep::new(
                "SFTP-03",
                "Migrate File Processing Logic",
                "Transfer file parsing and validation logic",
                8,
                false,
            ),
            PlaybookStep::new(
                "SFTP-04",
                "Test File Transfers",
                "Validate file upload, download, and processing",
                6,
                true,
            ),
            PlaybookStep::new(
                "SFTP-05",
                "Update Client Credentials",
                "Provide new SFTP credentials to customer",
                2,
                false,
            ),
            PlaybookStep::new("SFTP-06", "Cutover Execution", "Switch to new SFTP server", 1, false),
        ];
        &self.steps
    }

    fn steps(&self) -> &[PlaybookStep] {
        &self.steps
    }

    fn prerequisites(&self) -> &'static [&'static str] {
        &[
            "File format specifications",
            "Sample files for each type",
            "Current SFTP schedules and frequency",
            "Encryption and security requirements",
            "File retention policies",
        ]
    }

    fn validation_checklist(&self) -> &'static [&'static str] {
        &[
            "File uploads successful",
            "File downloads successful",
            "File parsing working correctly",
            "Error notifications configured",
            "Archive and cleanup jobs scheduled",
            "Security and encryption verified",
        ]
    }

    fn rollback_plan(&self) -> &'static [&'static str] {
        &[
            "Re-enable legacy SFTP server accounts",
            "Redirect scheduled file transfers to legacy server",
            "Reprocess files received during the cutover window",
            "Notify customer of temporary reversion",
            "Analyze failure logs for root cause",
        ]
    }
}
