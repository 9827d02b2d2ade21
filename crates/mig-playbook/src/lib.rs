//! Channel migration playbooks
//!
//! Fixed, ordered migration steps per channel type.
//!
//! # Core Concepts
//!
//! - [`Playbook`]: shared interface (steps, prerequisites, checklist, rollback plan)
//! - [`EdiPlaybook`], [`SftpPlaybook`], [`ApiPlaybook`], [`ThickClientPlaybook`]: variants
//! - [`BasePlaybook`]: zero-step fallback for unmapped channel types
//! - [`PlaybookRegistry`]: channel type to variant mapping
//!
//! # Example
//!
//! ```rust,ignore
//! use mig_playbook::PlaybookRegistry;
//!
//! let registry = PlaybookRegistry::with_defaults();
//! let mut playbook = registry.select(&channel);
//! for step in playbook.generate_steps() {
//!     println!("{} {}", step.step_id, step.name);
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod api;
mod base;
mod edi;
mod playbook;
mod registry;
mod sftp;
mod thick_client;

pub use api::ApiPlaybook;
pub use base::BasePlaybook;
pub use edi::EdiPlaybook;
pub use playbook::{Playbook, PlaybookKind, PlaybookStep};
pub use registry::{playbook_id, PlaybookRegistry};
pub use sftp::SftpPlaybook;
pub use thick_client::ThickClientPlaybook;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
