use crate::error::SimulationError;

/// Summary statistics of the total-cost distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub p50: f64,
    pub p80: f64,
    pub p90: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min_value: f64,
    pub max_value: f64,
}

impl Statistics {
    /// Computes percentiles and moments of `totals`. The input is copied and sorted;
    /// the caller's order is left untouched.
    pub fn from_totals(totals: &[f64]) -> Result<Self, SimulationError> {
        if totals.is_empty() {
            return Err(SimulationError::Internal(
                "Cannot compute statistics of an empty sample".to_string(),
            ));
        }

        let mut sorted = totals.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        Ok(Self {
            p50: percentile(&sorted, 0.50),
            p80: percentile(&sorted, 0.80),
            p90: percentile(&sorted, 0.90),
            mean,
            std_dev: variance.sqrt(),
            min_value: sorted[0],
            max_value: sorted[sorted.len() - 1],
        })
    }
}

/// Linear-interpolation percentile of an ascending slice.
///
/// For quantile `q` the fractional rank is `q * (n - 1)`; the result blends the two
/// neighbouring order statistics. Monotone in `q`, and never outside the bracketing pair.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => return f64::NAN,
        1 => return sorted[0],
        _ => {}
    }

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;
    let lower = sorted[lower_index];
    let upper = sorted[upper_index];

    if lower_index == upper_index {
        return lower;
    }

    let fraction = rank - lower_index as f64;
    (lower + (upper - lower) * fraction).min(upper)
}
