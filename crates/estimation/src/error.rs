use monte_carlo::SimulationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimationError {
    #[error("Payload is missing required field '{0}'.")]
    MissingField(String),

    #[error("Payload field '{field}' is invalid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown fixture '{0}'.")]
    UnknownFixture(String),

    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),
}
