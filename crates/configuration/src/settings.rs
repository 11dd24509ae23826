use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub logging: LoggingSettings,
    pub output: OutputSettings,
}

impl Settings {
    /// Rejects combinations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if sim.min_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "simulation.min_iterations must be at least 1".to_string(),
            ));
        }
        if sim.iterations < sim.min_iterations {
            return Err(ConfigError::ValidationError(format!(
                "simulation.iterations ({}) must not be below simulation.min_iterations ({})",
                sim.iterations, sim.min_iterations
            )));
        }
        if sim.histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "simulation.histogram_bins must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Contains parameters for the Monte Carlo engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Iterations used when a request does not specify its own count.
    pub iterations: usize,
    /// Requests below this many iterations are rejected as statistically unstable.
    pub min_iterations: usize,
    /// Number of equal-width bins in the total-cost histogram.
    pub histogram_bins: usize,
    /// Sample line items on the rayon thread pool.
    pub parallel: bool,
    /// A fixed seed makes every run reproducible. Leave unset for a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            iterations: 1000,
            min_iterations: 100,
            histogram_bins: 20,
            parallel: true,
            seed: None,
        }
    }
}

/// Controls the tracing subscriber installed by the binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// When set, logs go to a daily-rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// How the command-line front end renders a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
