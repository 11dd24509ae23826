//! # Core Types
//!
//! Layer 0 of the workspace: the plain records exchanged between the estimation
//! pipeline and the Monte Carlo engine, and the validation rules for them.
//! Nothing in here performs I/O or holds state between calls.

pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::ValidationError;
pub use structs::{HistogramBin, LineItemInput, MonteCarloResult, RiskFactor, SimulationRequest};
