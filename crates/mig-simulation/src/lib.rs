//! Migration simulation
//!
//! Validates a channel's migration before cutover by replaying synthetic
//! scenarios against a legacy and a modern responder and comparing the
//! responses.
//!
//! - [`SimulationEngine`]: creates and executes simulations
//! - [`ResponseGenerator`]: seam for producing each side's responses
//! - [`DivergentResponder`]: injects defects so both outcomes are testable
//!
//! # Example
//!
//! ```rust,ignore
//! use mig_simulation::SimulationEngine;
//!
//! let engine = SimulationEngine::new();
//! let simulation = engine.run("CUST-1", &channel);
//! assert!(simulation.passed());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod engine;
mod model;
mod responder;
mod templates;

pub use engine::{canonical_json, compare_responses, SimulationEngine, PAYLOAD_DIFFERENCE};
pub use model::{
    MigrationSimulation, SimulationResult, SimulationStatus, TestScenario, DEFAULT_PASS_THRESHOLD,
};
pub use responder::{
    Divergence, DivergentResponder, MirrorResponder, ResponseGenerator, SystemResponse, SystemSide,
    STATUS_SUCCESS,
};
pub use templates::{templates_for, ScenarioTemplate};
