//! # Estimation Boundary
//!
//! Sits between the estimation pipeline and the Monte Carlo engine. Pipeline payloads are
//! loosely-typed JSON; this crate converts them into validated engine records once, runs the
//! engine, and maps the result back into the pipeline's schema with currency rounded to cents.
//!
//! ## Public API
//!
//! - `Estimator`: runs simulations with settings from the `configuration` crate.
//! - `EstimateSummary`: the pipeline-facing view of a `MonteCarloResult`.
//! - `payload`: JSON-to-record conversion.
//! - `fixtures`: built-in bills of quantities.

pub mod error;
pub mod fixtures;
pub mod payload;
pub mod summary;

pub use error::EstimationError;
pub use summary::{BinSummary, EstimateSummary, RiskSummary};

use configuration::SimulationSettings;
use core_types::{LineItemInput, MonteCarloResult, SimulationRequest};
use monte_carlo::{EngineOptions, MonteCarloEngine};
use serde_json::Value;

/// Runs cost simulations on behalf of the pipeline.
#[derive(Debug, Clone)]
pub struct Estimator {
    settings: SimulationSettings,
    engine: MonteCarloEngine,
}

impl Estimator {
    pub fn new(settings: SimulationSettings) -> Self {
        let engine = MonteCarloEngine::new(EngineOptions {
            histogram_bins: settings.histogram_bins,
            min_iterations: settings.min_iterations,
            parallel: settings.parallel,
        });
        Self { settings, engine }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Builds a request, falling back to the configured iteration count and seed.
    pub fn request(
        &self,
        items: Vec<LineItemInput>,
        iterations: Option<usize>,
        seed: Option<u64>,
    ) -> SimulationRequest {
        SimulationRequest::new(
            items,
            iterations.unwrap_or(self.settings.iterations),
            seed.or(self.settings.seed),
        )
    }

    pub fn simulate(&self, request: &SimulationRequest) -> Result<MonteCarloResult, EstimationError> {
        Ok(self.engine.run_simulation(request)?)
    }

    /// Payload in, pipeline summary out.
    pub fn estimate_value(&self, payload: &Value) -> Result<EstimateSummary, EstimationError> {
        let request = payload::request_from_value(payload, &self.settings)?;
        tracing::debug!(
            items = request.items.len(),
            iterations = request.iterations,
            "Parsed estimation payload"
        );
        let result = self.simulate(&request)?;
        EstimateSummary::from_result(&result)
    }
}
