use core_types::LineItemInput;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Inverse-CDF sample of a triangular distribution for a uniform variate `u` in `[0, 1)`.
///
/// A point mass (`low == high`) returns `low` for every `u`.
pub fn sample_triangular(low: f64, likely: f64, high: f64, u: f64) -> f64 {
    if low == high {
        return low;
    }

    let range = high - low;
    let mode_fraction = (likely - low) / range;

    if u < mode_fraction {
        low + (u * range * (likely - low)).sqrt()
    } else {
        high - ((1.0 - u) * range * (high - likely)).sqrt()
    }
}

/// Draws `iterations` total-cost samples (`quantity * unit cost`) for one line item.
///
/// One uniform variate is consumed per iteration even for fixed-price items, so the
/// stream position never depends on the item's parameters.
pub fn sample_item<R: Rng>(item: &LineItemInput, iterations: usize, rng: &mut R) -> Vec<f64> {
    (0..iterations)
        .map(|_| {
            let u: f64 = rng.random();
            item.quantity * sample_triangular(item.unit_cost_low, item.unit_cost_likely, item.unit_cost_high, u)
        })
        .collect()
}

/// Produces the per-item sample matrix: one column of `iterations` costs per item,
/// in input order.
///
/// The generator is seeded once; item `i` draws from ChaCha stream `i` of that seed.
/// Stream assignment does not depend on scheduling, so `parallel` only changes how fast
/// the matrix is filled, never its contents.
pub fn sample_matrix(items: &[LineItemInput], iterations: usize, seed: u64, parallel: bool) -> Vec<Vec<f64>> {
    let base = ChaCha8Rng::seed_from_u64(seed);

    let sample_column = |(index, item): (usize, &LineItemInput)| {
        let mut rng = base.clone();
        rng.set_stream(index as u64);
        sample_item(item, iterations, &mut rng)
    };

    if parallel {
        items.par_iter().enumerate().map(sample_column).collect()
    } else {
        items.iter().enumerate().map(sample_column).collect()
    }
}
