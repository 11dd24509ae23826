use thiserror::Error;

/// Reasons a simulation request is rejected before any sampling takes place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error(
        "Line item '{item_id}' has an invalid triangular distribution: low={low}, likely={likely}, high={high} (expected low <= likely <= high)"
    )]
    InvalidDistribution {
        item_id: String,
        low: f64,
        likely: f64,
        high: f64,
    },

    #[error("Line item '{item_id}' has a negative quantity ({quantity}).")]
    InvalidQuantity { item_id: String, quantity: f64 },

    #[error("Line item '{item_id}' has a non-finite value for '{field}'.")]
    NonFiniteValue { item_id: String, field: &'static str },

    #[error("Line item id '{0}' appears more than once in the request.")]
    DuplicateItemId(String),

    #[error("Cannot simulate an empty set of line items.")]
    EmptyInput,

    #[error("Iteration count {requested} is below the required minimum of {minimum}.")]
    InvalidIterationCount { requested: usize, minimum: usize },
}
