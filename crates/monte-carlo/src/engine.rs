use crate::aggregator::aggregate;
use crate::contingency::{is_atypical, recommend_contingency};
use crate::error::SimulationError;
use crate::histogram::{build_histogram, DEFAULT_BINS};
use crate::sampler::sample_matrix;
use crate::sensitivity::{decompose, rank_risks, TOP_RISK_LIMIT};
use crate::statistics::Statistics;
use core_types::{LineItemInput, MonteCarloResult, SimulationRequest};

/// Requests below this many iterations are rejected unless the options lower it.
pub const DEFAULT_MIN_ITERATIONS: usize = 100;

/// Tuning knobs for the engine. None of them change the meaning of a result.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub histogram_bins: usize,
    pub min_iterations: usize,
    /// Sample items on the rayon pool. Results are bit-identical either way.
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_BINS,
            min_iterations: DEFAULT_MIN_ITERATIONS,
            parallel: true,
        }
    }
}

/// A stateless Monte Carlo simulator for project cost uncertainty.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    options: EngineOptions,
}

impl MonteCarloEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The main entry point: validates the request, then samples, aggregates and
    /// summarises it into a `MonteCarloResult`.
    ///
    /// Validation happens before any random number is drawn. A request without a seed
    /// gets a fresh one, recorded in the result so the run can be replayed.
    #[tracing::instrument(
        name = "run_simulation",
        skip(self, request),
        fields(items = request.items.len(), iterations = request.iterations)
    )]
    pub fn run_simulation(&self, request: &SimulationRequest) -> Result<MonteCarloResult, SimulationError> {
        if self.options.histogram_bins == 0 {
            return Err(SimulationError::InvalidHistogramBins(0));
        }
        request.validate(self.options.min_iterations)?;

        let seed = request.seed.unwrap_or_else(rand::random);
        let items = &request.items;

        if items.iter().all(LineItemInput::is_fixed_price) {
            tracing::warn!("Every line item is fixed-price; the simulation has zero variance.");
        }

        // 1. Sample
        let matrix = sample_matrix(items, request.iterations, seed, self.options.parallel);
        tracing::debug!(seed, parallel = self.options.parallel, "Sampled {} line items", items.len());

        // 2. Aggregate
        let aggregation = aggregate(matrix);

        // 3. Summarise
        let stats = Statistics::from_totals(&aggregation.totals)?;
        let histogram = build_histogram(
            &aggregation.totals,
            stats.min_value,
            stats.max_value,
            self.options.histogram_bins,
        )?;
        tracing::debug!(bins = histogram.len(), "Built total-cost histogram");

        let contributions = decompose(items, &aggregation.item_costs);
        let top_risks = rank_risks(items, &contributions, TOP_RISK_LIMIT);
        let recommended_contingency = recommend_contingency(stats.p50, stats.p80);

        if recommended_contingency > 0.0 && is_atypical(recommended_contingency) {
            tracing::warn!(
                recommended_contingency,
                "Recommended contingency is outside the typical 5-25% band."
            );
        }

        tracing::info!(
            seed,
            p50 = stats.p50,
            p80 = stats.p80,
            p90 = stats.p90,
            recommended_contingency,
            "Simulation complete"
        );

        Ok(MonteCarloResult {
            iterations: aggregation.iterations(),
            seed,
            item_count: items.len(),
            p50: stats.p50,
            p80: stats.p80,
            p90: stats.p90,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min_value: stats.min_value,
            max_value: stats.max_value,
            recommended_contingency,
            top_risks,
            histogram,
        })
    }
}

/// Runs a simulation with default engine options.
pub fn run_simulation(
    items: Vec<LineItemInput>,
    iterations: usize,
    seed: Option<u64>,
) -> Result<MonteCarloResult, SimulationError> {
    MonteCarloEngine::default().run_simulation(&SimulationRequest::new(items, iterations, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ValidationError;

    fn varied_items() -> Vec<LineItemInput> {
        vec![
            LineItemInput::new("cab", "Cabinets", 20.0, 250.0, 350.0, 900.0),
            LineItemInput::new("tile", "Tile", 40.0, 18.0, 24.0, 38.0),
            LineItemInput::new("permit", "Permit", 1.0, 850.0, 850.0, 850.0),
        ]
    }

    #[test]
    fn degenerate_item_yields_exact_cost() {
        let items = vec![LineItemInput::new("fixed", "Fixed-price supply", 500.0, 1.25, 1.25, 1.25)];
        let result = run_simulation(items, 250, Some(1)).unwrap();

        assert_eq!(result.p50, 625.0);
        assert_eq!(result.p80, 625.0);
        assert_eq!(result.p90, 625.0);
        assert_eq!(result.mean, 625.0);
        assert_eq!(result.std_dev, 0.0);
        assert_eq!(result.min_value, 625.0);
        assert_eq!(result.max_value, 625.0);
        assert_eq!(result.recommended_contingency, 0.0);
        assert!(result.top_risks.is_empty());
        assert_eq!(result.histogram.len(), 1);
        assert_eq!(result.histogram[0].count, 250);
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let first = run_simulation(varied_items(), 1000, Some(42)).unwrap();
        let second = run_simulation(varied_items(), 1000, Some(42)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.seed, 42);
    }

    #[test]
    fn parallelism_does_not_change_results() {
        let request = SimulationRequest::new(varied_items(), 2000, Some(7));
        let sequential = MonteCarloEngine::new(EngineOptions {
            parallel: false,
            ..EngineOptions::default()
        })
        .run_simulation(&request)
        .unwrap();
        let parallel = MonteCarloEngine::default().run_simulation(&request).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn missing_seed_is_recorded_and_replayable() {
        let first = run_simulation(varied_items(), 500, None).unwrap();
        let replay = run_simulation(varied_items(), 500, Some(first.seed)).unwrap();
        assert_eq!(first, replay);
    }

    #[test]
    fn fixed_items_are_excluded_from_risks() {
        let result = run_simulation(varied_items(), 1000, Some(3)).unwrap();
        assert_eq!(result.top_risks.len(), 2);
        assert_eq!(result.top_risks[0].item_id, "cab");
        assert!(result.top_risks.iter().all(|r| r.item_id != "permit"));
        assert!(result.p50 <= result.p80 && result.p80 <= result.p90);
    }

    #[test]
    fn invalid_distribution_is_reported_the_same_way_every_time() {
        let items = vec![LineItemInput::new("bad", "Backwards", 1.0, 10.0, 5.0, 20.0)];
        let first = run_simulation(items.clone(), 1000, Some(1)).unwrap_err();
        let second = run_simulation(items, 1000, Some(1)).unwrap_err();
        assert_eq!(first, second);
        assert!(matches!(
            first,
            SimulationError::Validation(ValidationError::InvalidDistribution { ref item_id, .. }) if item_id == "bad"
        ));
    }

    #[test]
    fn rejects_small_iteration_counts() {
        let err = run_simulation(varied_items(), 99, Some(1)).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Validation(ValidationError::InvalidIterationCount {
                requested: 99,
                minimum: 100,
            })
        );
    }

    #[test]
    fn lowered_minimum_allows_short_runs() {
        let engine = MonteCarloEngine::new(EngineOptions {
            min_iterations: 1,
            ..EngineOptions::default()
        });
        let result = engine
            .run_simulation(&SimulationRequest::new(varied_items(), 10, Some(5)))
            .unwrap();
        assert_eq!(result.iterations, 10);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            run_simulation(vec![], 1000, None).unwrap_err(),
            SimulationError::Validation(ValidationError::EmptyInput)
        );
    }

    #[test]
    fn rejects_zero_bins() {
        let engine = MonteCarloEngine::new(EngineOptions {
            histogram_bins: 0,
            ..EngineOptions::default()
        });
        let err = engine
            .run_simulation(&SimulationRequest::new(varied_items(), 100, Some(1)))
            .unwrap_err();
        assert_eq!(err, SimulationError::InvalidHistogramBins(0));
    }
}
