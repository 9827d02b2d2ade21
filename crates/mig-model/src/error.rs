//! Parse errors for model enums

/// Failure to parse a canonical string into a model enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unknown channel type
    #[error("unknown channel type: {0}")]
    ChannelType(String),

    /// Unknown business criticality tier
    #[error("unknown business criticality: {0}")]
    Criticality(String),

    /// Unknown migration strategy
    #[error("unknown migration strategy: {0} (expected phased, big-bang or parallel)")]
    Strategy(String),

    /// Unknown migration status
    #[error("unknown migration status: {0}")]
    Status(String),
}
