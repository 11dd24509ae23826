use core_types::{LineItemInput, RiskFactor};

/// Maximum number of risk factors reported in a result.
pub const TOP_RISK_LIMIT: usize = 5;

/// Variance contribution of one line item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemContribution {
    /// Position of the item in the request.
    pub index: usize,
    pub variance: f64,
    /// Standard deviation of the item's cost; the ranking key.
    pub impact: f64,
    /// `variance / Σ variance` over all items, or 0 when nothing varies.
    pub sensitivity: f64,
    /// Share of iterations where the item cost more than its most likely cost.
    pub overrun_probability: f64,
}

/// Decomposes total variance across all items.
///
/// Items are sampled independently, so `Var(total) = Σ Var(item)` and the returned
/// sensitivities sum to one whenever any item varies. Fixed-price items report exactly
/// zero variance rather than floating-point residue.
pub fn decompose(items: &[LineItemInput], item_costs: &[Vec<f64>]) -> Vec<ItemContribution> {
    let mut contributions: Vec<ItemContribution> = items
        .iter()
        .zip(item_costs)
        .enumerate()
        .map(|(index, (item, costs))| {
            let variance = if item.is_fixed_price() {
                0.0
            } else {
                population_variance(costs)
            };
            ItemContribution {
                index,
                variance,
                impact: variance.sqrt(),
                sensitivity: 0.0,
                overrun_probability: overrun_probability(costs, item.most_likely_cost()),
            }
        })
        .collect();

    let total_variance: f64 = contributions.iter().map(|c| c.variance).sum();
    if total_variance > 0.0 {
        for contribution in &mut contributions {
            contribution.sensitivity = contribution.variance / total_variance;
        }
    }

    contributions
}

/// Ranks the items with non-zero variance by impact, largest first, and keeps at most `limit`.
///
/// The sort is stable so equal impacts keep input order.
pub fn rank_risks(items: &[LineItemInput], contributions: &[ItemContribution], limit: usize) -> Vec<RiskFactor> {
    let mut ranked: Vec<&ItemContribution> = contributions.iter().filter(|c| c.variance > 0.0).collect();
    ranked.sort_by(|a, b| b.impact.total_cmp(&a.impact));

    ranked
        .into_iter()
        .take(limit)
        .map(|c| {
            let item = &items[c.index];
            RiskFactor {
                item_id: item.id.clone(),
                item: item.description.clone(),
                impact: c.impact,
                probability: c.overrun_probability,
                sensitivity: c.sensitivity,
            }
        })
        .collect()
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

fn overrun_probability(costs: &[f64], most_likely: f64) -> f64 {
    if costs.is_empty() {
        return 0.0;
    }
    let overruns = costs.iter().filter(|&&c| c > most_likely).count();
    overruns as f64 / costs.len() as f64
}
