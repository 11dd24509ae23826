//! # Monte Carlo Cost Engine
//!
//! This crate turns a set of independently-varying cost line items into decision-ready
//! numbers: confidence percentiles, a recommended contingency, the line items that
//! drive the most risk, and a histogram of simulated total cost.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate. It performs no I/O and depends only on
//!   `core-types` (Layer 0).
//! - **Stateless Calculation:** `MonteCarloEngine` holds only its options. Every call owns
//!   its RNG, sample buffers and intermediate vectors; nothing is cached between calls.
//! - **Reproducible:** each line item draws from its own ChaCha stream derived from the
//!   request seed, so a fixed seed yields bit-identical results whether items are sampled
//!   sequentially or in parallel.
//!
//! ## Pipeline
//!
//! validate -> [`sampler`] -> [`aggregator`] -> [`statistics`], [`histogram`],
//! [`sensitivity`], [`contingency`] -> `MonteCarloResult`.

// Declare the modules that constitute this crate.
pub mod aggregator;
pub mod contingency;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod sampler;
pub mod sensitivity;
pub mod statistics;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{run_simulation, EngineOptions, MonteCarloEngine};
pub use error::SimulationError;
pub use statistics::Statistics;
