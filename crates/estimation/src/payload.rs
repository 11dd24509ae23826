use crate::error::EstimationError;
use configuration::SimulationSettings;
use core_types::{LineItemInput, SimulationRequest};
use rust_decimal::prelude::*;
use serde_json::{Map, Value};

const QUANTITY: &[&str] = &["quantity"];
const UNIT_COST_LOW: &[&str] = &["unit_cost_low", "unitCostLow"];
const UNIT_COST_LIKELY: &[&str] = &["unit_cost_likely", "unitCostLikely"];
const UNIT_COST_HIGH: &[&str] = &["unit_cost_high", "unitCostHigh"];

/// Converts a pipeline payload into typed line items.
///
/// Accepts either a bare array of item maps or an object holding an `items` array.
/// Only the shape is checked here; distribution and quantity rules are enforced by the engine.
pub fn line_items_from_value(payload: &Value) -> Result<Vec<LineItemInput>, EstimationError> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("items") {
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(invalid("items", "expected an array of line items")),
            None => return Err(EstimationError::MissingField("items".to_string())),
        },
        _ => return Err(invalid("items", "expected an array or an object with an 'items' array")),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| line_item_from_value(index, entry))
        .collect()
}

/// Builds a full simulation request, taking `iterations` and `seed` from the payload when
/// present and from `settings` otherwise.
pub fn request_from_value(
    payload: &Value,
    settings: &SimulationSettings,
) -> Result<SimulationRequest, EstimationError> {
    let items = line_items_from_value(payload)?;

    let iterations = match payload.get("iterations") {
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| invalid("iterations", "expected a positive integer"))?,
        None => settings.iterations,
    };

    let seed = match payload.get("seed") {
        Some(Value::Null) | None => settings.seed,
        Some(value) => Some(
            value
                .as_u64()
                .ok_or_else(|| invalid("seed", "expected a non-negative integer"))?,
        ),
    };

    Ok(SimulationRequest::new(items, iterations, seed))
}

fn line_item_from_value(index: usize, entry: &Value) -> Result<LineItemInput, EstimationError> {
    let path = format!("items[{index}]");
    let map = entry
        .as_object()
        .ok_or_else(|| invalid(&path, "expected an object"))?;

    let id = match map.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        Some(_) => return Err(invalid(&format!("{path}.id"), "expected a string or number")),
        None => return Err(EstimationError::MissingField(format!("{path}.id"))),
    };

    let description = match map.get("description") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => id.clone(),
        Some(_) => return Err(invalid(&format!("{path}.description"), "expected a string")),
    };

    Ok(LineItemInput {
        quantity: number_field(map, QUANTITY, &path)?,
        unit_cost_low: number_field(map, UNIT_COST_LOW, &path)?,
        unit_cost_likely: number_field(map, UNIT_COST_LIKELY, &path)?,
        unit_cost_high: number_field(map, UNIT_COST_HIGH, &path)?,
        id,
        description,
    })
}

/// Reads the first present key of `aliases` as a decimal and converts it for the engine.
fn number_field(map: &Map<String, Value>, aliases: &[&str], path: &str) -> Result<f64, EstimationError> {
    let field = format!("{path}.{}", aliases[0]);
    let value = aliases
        .iter()
        .find_map(|key| map.get(*key))
        .ok_or_else(|| EstimationError::MissingField(field.clone()))?;

    let amount = parse_decimal(value, &field)?;
    amount
        .to_f64()
        .ok_or_else(|| invalid(&field, "value is out of range"))
}

/// Parses a JSON number or decimal string exactly.
pub fn parse_decimal(value: &Value, field: &str) -> Result<Decimal, EstimationError> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|e| invalid(field, &e.to_string()))
        }
        Value::String(text) => Decimal::from_str(text.trim()).map_err(|e| invalid(field, &e.to_string())),
        _ => Err(invalid(field, "expected a number or a decimal string")),
    }
}

fn invalid(field: &str, reason: &str) -> EstimationError {
    EstimationError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_snake_and_camel_case_items() {
        let payload = json!([
            {"id": "demo", "description": "Demolition", "quantity": 1,
             "unit_cost_low": 1500, "unit_cost_likely": 2200, "unit_cost_high": 6500},
            {"id": 7, "quantity": "420", "unitCostLow": "2.50", "unitCostLikely": 3, "unitCostHigh": 4.5}
        ]);
        let items = line_items_from_value(&payload).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "demo");
        assert_eq!(items[0].unit_cost_high, 6500.0);
        assert_eq!(items[1].id, "7");
        assert_eq!(items[1].description, "7");
        assert_eq!(items[1].quantity, 420.0);
        assert_eq!(items[1].unit_cost_low, 2.5);
        assert_eq!(items[1].unit_cost_high, 4.5);
    }

    #[test]
    fn accepts_wrapped_items() {
        let payload = json!({"items": [
            {"id": "a", "quantity": 2, "unit_cost_low": 1, "unit_cost_likely": 2, "unit_cost_high": 3}
        ]});
        assert_eq!(line_items_from_value(&payload).unwrap().len(), 1);
    }

    #[test]
    fn reports_missing_fields_with_their_path() {
        let payload = json!([{"id": "a", "quantity": 1, "unit_cost_low": 1, "unit_cost_high": 3}]);
        match line_items_from_value(&payload).unwrap_err() {
            EstimationError::MissingField(field) => assert_eq!(field, "items[0].unit_cost_likely"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_costs() {
        let payload = json!([{"id": "a", "quantity": true, "unit_cost_low": 1, "unit_cost_likely": 2, "unit_cost_high": 3}]);
        assert!(matches!(
            line_items_from_value(&payload),
            Err(EstimationError::InvalidField { field, .. }) if field == "items[0].quantity"
        ));
    }

    #[test]
    fn rejects_payload_without_items() {
        assert!(matches!(
            line_items_from_value(&json!({"lines": []})),
            Err(EstimationError::MissingField(_))
        ));
        assert!(matches!(
            line_items_from_value(&json!("items")),
            Err(EstimationError::InvalidField { .. })
        ));
    }

    #[test]
    fn request_falls_back_to_settings() {
        let settings = SimulationSettings {
            seed: Some(99),
            ..SimulationSettings::default()
        };
        let payload = json!({"items": [
            {"id": "a", "quantity": 1, "unit_cost_low": 1, "unit_cost_likely": 2, "unit_cost_high": 3}
        ]});
        let request = request_from_value(&payload, &settings).unwrap();
        assert_eq!(request.iterations, 1000);
        assert_eq!(request.seed, Some(99));

        let overridden = json!({"iterations": 5000, "seed": 42, "items": payload["items"].clone()});
        let request = request_from_value(&overridden, &settings).unwrap();
        assert_eq!(request.iterations, 5000);
        assert_eq!(request.seed, Some(42));
    }

    #[test]
    fn parses_decimal_strings_exactly() {
        let value = parse_decimal(&json!("1234.565"), "x").unwrap();
        assert_eq!(value.to_string(), "1234.565");
    }
}
