//! Playbook trait and core types
//!
//! Provides the [`Playbook`] trait implemented by every channel-specific
//! playbook variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One ordered migration step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookStep {
    /// Step identifier (`EDI-01`, `SFTP-03`, ...)
    pub step_id: String,
    /// Short name
    pub name: String,
    /// What the step does
    pub description: String,
    /// Estimated effort in hours
    pub estimated_duration_hours: u32,
    /// Whether the step runs without an operator
    pub automated: bool,
    /// Whether the step needs sign-off
    pub validation_required: bool,
}

impl PlaybookStep {
    /// Create new step; every built-in step requires validation
    #[inline]
    #[must_use]
    pub fn new(
        step_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        estimated_duration_hours: u32,
        automated: bool,
    ) -> Self {
        Self {
            step_id: step_id.into(),
            name: name.into(),
            description: description.into(),
            estimated_duration_hours,
            automated,
            validation_required: true,
        }
    }
}

/// Playbook variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybookKind {
    /// X12 / EDIFACT document exchange
    Edi,
    /// File transfer
    Sftp,
    /// REST, SOAP and web portal
    Api,
    /// Desktop application replacement
    ThickClient,
    /// Fallback with no steps
    #[default]
    Base,
}

impl PlaybookKind {
    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybookKind::Edi => "edi",
            PlaybookKind::Sftp => "sftp",
            PlaybookKind::Api => "api",
            PlaybookKind::ThickClient => "thick_client",
            PlaybookKind::Base => "base",
        }
    }
}

impl fmt::Display for PlaybookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel-specific migration playbook
///
/// Generation is pure: the same channel configuration always yields the same
/// steps. The instance keeps the last generated steps for inspection.
pub trait Playbook: Send + Sync + fmt::Debug {
    /// Variant of this playbook
    fn kind(&self) -> PlaybookKind;

    /// Generate (or regenerate) the ordered step list
    fn generate_steps(&mut self) -> &[PlaybookStep];

    /// Steps from the last `generate_steps` call; empty before the first
    fn steps(&self) -> &[PlaybookStep];

    /// What must be in hand before starting
    fn prerequisites(&self) -> &'static [&'static str] {
        &[]
    }

    /// What to check once migrated
    fn validation_checklist(&self) -> &'static [&'static str] {
        &[]
    }

    /// How to revert
    fn rollback_plan(&self) -> &'static [&'static str] {
        &[]
    }

    /// Sum of step estimates from the last generation
    fn total_estimated_hours(&self) -> u32 {
        self.steps().iter().map(|s| s.estimated_duration_hours).sum()
    }
}
