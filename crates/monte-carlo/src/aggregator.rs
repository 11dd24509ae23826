/// Per-iteration totals together with the per-item columns they were summed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// `totals[i]` is the project cost in iteration `i`.
    pub totals: Vec<f64>,
    /// `item_costs[j][i]` is item `j`'s cost in iteration `i`. Kept for sensitivity analysis.
    pub item_costs: Vec<Vec<f64>>,
}

impl Aggregation {
    pub fn iterations(&self) -> usize {
        self.totals.len()
    }
}

/// Sums the item columns into one total per iteration.
///
/// Items are added in input order, so the floating-point result does not depend on how
/// the columns were produced.
pub fn aggregate(item_costs: Vec<Vec<f64>>) -> Aggregation {
    let iterations = item_costs.first().map_or(0, Vec::len);
    let mut totals = vec![0.0; iterations];

    for column in &item_costs {
        debug_assert_eq!(column.len(), iterations, "ragged sample matrix");
        for (total, cost) in totals.iter_mut().zip(column) {
            *total += cost;
        }
    }

    Aggregation { totals, item_costs }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_columns_per_iteration() {
        let aggregation = aggregate(vec![vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0], vec![0.5, 0.5, 0.5]]);
        assert_eq!(aggregation.totals, vec![11.5, 22.5, 33.5]);
        assert_eq!(aggregation.iterations(), 3);
        assert_eq!(aggregation.item_costs.len(), 3);
    }

    #[test]
    fn no_items_means_no_iterations() {
        let aggregation = aggregate(vec![]);
        assert!(aggregation.totals.is_empty());
    }
}
