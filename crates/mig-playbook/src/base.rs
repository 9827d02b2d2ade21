//! Fallback playbook

use crate::playbook::{Playbook, PlaybookKind, PlaybookStep};

/// Playbook for channel types with no registered variant; produces no steps
#[derive(Debug, Clone, Copy, Default)]
pub struct BasePlaybook;

impl BasePlaybook {
    /// Create new playbook
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Playbook for BasePlaybook {
    fn kind(&self) -> PlaybookKind {
        PlaybookKind::Base
    }

    fn generate_steps(&mut self) -> &[PlaybookStep] {
        &[]
    }

    fn steps(&self) -> &[PlaybookStep] {
        &[]
    }
}
