use core_types::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid simulation input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Histogram bin count must be at least 1, got {0}.")]
    InvalidHistogramBins(usize),

    #[error("An unexpected error occurred during simulation: {0}")]
    Internal(String),
}
