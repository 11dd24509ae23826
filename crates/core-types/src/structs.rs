use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One costed scope item from a bill of quantities.
///
/// The per-unit cost is modelled as a triangular distribution over
/// `unit_cost_low..=unit_cost_high` peaking at `unit_cost_likely`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub id: String,
    pub description: String,
    pub quantity: f64,
    pub unit_cost_low: f64,
    pub unit_cost_likely: f64,
    pub unit_cost_high: f64,
}

impl LineItemInput {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        quantity: f64,
        unit_cost_low: f64,
        unit_cost_likely: f64,
        unit_cost_high: f64,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            quantity,
            unit_cost_low,
            unit_cost_likely,
            unit_cost_high,
        }
    }

    /// Checks the item's own invariants: finite numbers, a non-negative quantity
    /// and `low <= likely <= high`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("quantity", self.quantity),
            ("unit_cost_low", self.unit_cost_low),
            ("unit_cost_likely", self.unit_cost_likely),
            ("unit_cost_high", self.unit_cost_high),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NonFiniteValue {
                item_id: self.id.clone(),
                field: *field,
            });
        }

        if self.quantity < 0.0 {
            return Err(ValidationError::InvalidQuantity {
                item_id: self.id.clone(),
                quantity: self.quantity,
            });
        }

        if self.unit_cost_low > self.unit_cost_likely || self.unit_cost_likely > self.unit_cost_high {
            return Err(ValidationError::InvalidDistribution {
                item_id: self.id.clone(),
                low: self.unit_cost_low,
                likely: self.unit_cost_likely,
                high: self.unit_cost_high,
            });
        }

        Ok(())
    }

    /// True when every draw yields the same cost: a point-mass distribution or a zero quantity.
    pub fn is_fixed_price(&self) -> bool {
        self.unit_cost_low == self.unit_cost_high || self.quantity == 0.0
    }

    /// The item cost at the mode of its distribution.
    pub fn most_likely_cost(&self) -> f64 {
        self.quantity * self.unit_cost_likely
    }
}

/// A complete request to the Monte Carlo engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Item order fixes the RNG stream each item draws from.
    pub items: Vec<LineItemInput>,
    pub iterations: usize,
    /// `None` asks the engine to pick a fresh seed and record it in the result.
    pub seed: Option<u64>,
}

impl SimulationRequest {
    /// Iteration count used when the caller does not choose one.
    pub const DEFAULT_ITERATIONS: usize = 1000;

    pub fn new(items: Vec<LineItemInput>, iterations: usize, seed: Option<u64>) -> Self {
        Self {
            items,
            iterations,
            seed,
        }
    }

    /// Validates the whole request. The first failing precondition is reported.
    pub fn validate(&self, min_iterations: usize) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        let minimum = min_iterations.max(1);
        if self.iterations < minimum {
            return Err(ValidationError::InvalidIterationCount {
                requested: self.iterations,
                minimum,
            });
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(ValidationError::DuplicateItemId(item.id.clone()));
            }
        }

        Ok(())
    }
}

/// A line item ranked by its contribution to total cost uncertainty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub item_id: String,
    /// Description of the contributing line item.
    pub item: String,
    /// Standard deviation of the item's simulated cost, in currency units.
    pub impact: f64,
    /// Observed share of iterations where the item overran its most likely cost.
    /// Informational only; ranking uses `impact`.
    pub probability: f64,
    /// Share of total variance attributable to this item, in `[0, 1]`.
    pub sensitivity: f64,
}

/// One equal-width bucket of simulated total cost. Half-open except for the last bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub range_low: f64,
    pub range_high: f64,
    pub count: usize,
    pub percentage: f64,
}

/// The full outcome of one simulation run.
///
/// Built once by the engine and handed to the caller, who owns it from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub iterations: usize,
    /// The seed actually used, so that any run can be replayed.
    pub seed: u64,
    pub item_count: usize,

    // Percentiles of the total-cost distribution
    pub p50: f64,
    pub p80: f64,
    pub p90: f64,

    // Descriptive statistics
    pub mean: f64,
    pub std_dev: f64,
    pub min_value: f64,
    pub max_value: f64,

    /// Recommended contingency as a percentage of P50.
    pub recommended_contingency: f64,
    pub top_risks: Vec<RiskFactor>,
    pub histogram: Vec<HistogramBin>,
}
