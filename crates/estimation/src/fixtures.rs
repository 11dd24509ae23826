use crate::error::EstimationError;
use core_types::LineItemInput;

/// Built-in bills of quantities, by name, with a short description.
pub const FIXTURES: &[(&str, &str)] = &[(
    "kitchen-remodel",
    "20-line mid-range kitchen remodel (demolition through final clean)",
)];

/// Resolves a built-in fixture by name.
pub fn by_name(name: &str) -> Result<Vec<LineItemInput>, EstimationError> {
    match name {
        "kitchen-remodel" => Ok(kitchen_remodel()),
        other => Err(EstimationError::UnknownFixture(other.to_string())),
    }
}

/// A mid-range kitchen remodel. Trades exposed to hidden conditions (demolition,
/// plumbing, electrical) carry long upper tails; paint and permits are fixed-price.
pub fn kitchen_remodel() -> Vec<LineItemInput> {
    // (id, description, quantity, low, likely, high)
    let lines: [(&str, &str, f64, f64, f64, f64); 20] = [
        ("KR-01", "Demolition and haul-away", 1.0, 1500.0, 2200.0, 6500.0),
        ("KR-02", "Dumpster rental", 1.0, 450.0, 500.0, 650.0),
        ("KR-03", "Framing modifications (lf)", 60.0, 15.0, 22.0, 90.0),
        ("KR-04", "Plumbing rough-in", 1.0, 2000.0, 2800.0, 11000.0),
        ("KR-05", "Electrical rough-in and panel work", 1.0, 2200.0, 3200.0, 12000.0),
        ("KR-06", "Drywall hang and finish (sf)", 420.0, 2.5, 3.0, 4.5),
        ("KR-07", "Base cabinets (lf)", 22.0, 250.0, 350.0, 900.0),
        ("KR-08", "Wall cabinets (lf)", 18.0, 200.0, 290.0, 750.0),
        ("KR-09", "Quartz countertops (sf)", 55.0, 60.0, 85.0, 220.0),
        ("KR-10", "Tile backsplash (sf)", 40.0, 18.0, 24.0, 38.0),
        ("KR-11", "Luxury vinyl plank flooring (sf)", 180.0, 4.5, 6.0, 9.0),
        ("KR-12", "Sink and faucet", 1.0, 450.0, 650.0, 1100.0),
        ("KR-13", "Appliance package", 1.0, 5500.0, 8000.0, 18000.0),
        ("KR-14", "Lighting fixtures (ea)", 8.0, 85.0, 120.0, 220.0),
        ("KR-15", "Interior paint (sf)", 420.0, 1.25, 1.25, 1.25),
        ("KR-16", "Cabinet hardware (ea)", 40.0, 6.0, 9.0, 15.0),
        ("KR-17", "Range hood and venting", 1.0, 600.0, 850.0, 1400.0),
        ("KR-18", "Building permit", 1.0, 850.0, 850.0, 850.0),
        ("KR-19", "Window replacement", 1.0, 800.0, 1200.0, 4000.0),
        ("KR-20", "Final cleanup", 1.0, 300.0, 400.0, 600.0),
    ];

    lines
        .into_iter()
        .map(|(id, description, quantity, low, likely, high)| {
            LineItemInput::new(id, description, quantity, low, likely, high)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kitchen_remodel_is_valid() {
        let items = kitchen_remodel();
        assert_eq!(items.len(), 20);
        for item in &items {
            item.validate().unwrap();
        }
        assert_eq!(items.iter().filter(|i| i.is_fixed_price()).count(), 2);
    }

    #[test]
    fn every_listed_fixture_resolves() {
        for (name, _) in FIXTURES {
            assert!(!by_name(name).unwrap().is_empty());
        }
        assert!(matches!(by_name("bathroom"), Err(EstimationError::UnknownFixture(_))));
    }
}
