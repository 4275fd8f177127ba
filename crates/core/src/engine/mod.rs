//! The decision and valuation engine.
//!
//! Every entry point is a pure, synchronous function over borrowed input:
//! no I/O, no shared state, no randomness. Identical input gives identical
//! output.

pub mod analysis;
pub mod confidence;
pub mod plan;
pub mod route;
pub mod rules;
pub mod stats;
pub mod valuation;

pub use analysis::analyze;
pub use confidence::compute_confidence;
pub use plan::generate_action_plan;
pub use route::compute_route;
pub use valuation::{compute_valuation, validate_dcf_input};
