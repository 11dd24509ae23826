use crate::error::SimulationError;
use core_types::HistogramBin;

/// Default number of bins when the caller does not configure one.
pub const DEFAULT_BINS: usize = 20;

/// Partitions `[min_value, max_value]` into `bins` equal-width buckets and counts `totals`.
///
/// Bins are half-open except the last, which also holds `max_value`, so every sample lands
/// in exactly one bin. When the range collapses to a single value the histogram is a single
/// bin holding every sample.
pub fn build_histogram(
    totals: &[f64],
    min_value: f64,
    max_value: f64,
    bins: usize,
) -> Result<Vec<HistogramBin>, SimulationError> {
    if bins == 0 {
        return Err(SimulationError::InvalidHistogramBins(bins));
    }

    let iterations = totals.len();
    let as_percentage = |count: usize| {
        if iterations == 0 {
            0.0
        } else {
            count as f64 / iterations as f64 * 100.0
        }
    };

    if max_value <= min_value {
        return Ok(vec![HistogramBin {
            range_low: min_value,
            range_high: max_value,
            count: iterations,
            percentage: as_percentage(iterations),
        }]);
    }

    let width = (max_value - min_value) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &total in totals {
        let offset = ((total - min_value) / width).max(0.0);
        let index = (offset as usize).min(bins - 1);
        counts[index] += 1;
    }

    let histogram = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let range_low = min_value + width * i as f64;
            let range_high = if i == bins - 1 {
                max_value
            } else {
                min_value + width * (i + 1) as f64
            };
            HistogramBin {
                range_low,
                range_high,
                count,
                percentage: as_percentage(count),
            }
        })
        .collect();

    Ok(histogram)
}
