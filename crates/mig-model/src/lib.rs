//! Migration data model
//!
//! Shared vocabulary for every crate in the workspace:
//! - Customers and their integration channels
//! - Migration status state machine
//! - Per-channel migration records and customer migration plans
//!
//! All status-like values are enums with a single canonical string form used
//! for both `Display` and serde.

#![warn(unreachable_pub)]

pub mod customer;
pub mod error;
pub mod plan;
pub mod status;

pub use customer::{BusinessCriticality, ChannelType, Customer, IntegrationChannel};
pub use error::ParseError;
pub use plan::{ChannelMigration, MigrationPlan, MigrationStrategy, PlanId};
pub use status::{allowed_transitions, validate_transition, MigrationStatus};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the migration model
    pub use crate::{
        BusinessCriticality, ChannelMigration, ChannelType, Customer, IntegrationChannel,
        MigrationPlan, MigrationStatus, MigrationStrategy, PlanId,
    };
}
