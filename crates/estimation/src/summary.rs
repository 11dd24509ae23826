use crate::error::EstimationError;
use core_types::{HistogramBin, MonteCarloResult, RiskFactor};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;

const CENTS: u32 = 2;
const RATIO_DP: u32 = 4;

/// The external view of a simulation, as exposed by the estimation pipeline.
///
/// Currency is rounded to cents and percentages to two decimals. Field names follow the
/// pipeline's JSON schema (`recommendedContingency`, `topRisks`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateSummary {
    pub iterations: usize,
    pub seed: u64,
    pub p50: Decimal,
    pub p80: Decimal,
    pub p90: Decimal,
    pub mean: Decimal,
    pub std_dev: Decimal,
    pub min_value: Decimal,
    pub max_value: Decimal,
    pub recommended_contingency: Decimal,
    /// `p50 * recommended_contingency / 100`.
    pub contingency_amount: Decimal,
    /// `p50 + contingency_amount`.
    pub recommended_budget: Decimal,
    pub top_risks: Vec<RiskSummary>,
    pub histogram: Vec<BinSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSummary {
    pub item: String,
    pub impact: Decimal,
    pub probability: Decimal,
    pub sensitivity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinSummary {
    pub range_low: Decimal,
    pub range_high: Decimal,
    pub count: usize,
    pub percentage: Decimal,
}

impl EstimateSummary {
    pub fn from_result(result: &MonteCarloResult) -> Result<Self, EstimationError> {
        let p50 = round(result.p50, CENTS, "p50")?;
        let recommended_contingency = round(result.recommended_contingency, CENTS, "recommendedContingency")?;
        let exact_contingency = to_decimal(result.recommended_contingency, "recommendedContingency")?;
        let contingency_amount = round_decimal(p50 * exact_contingency / dec!(100), CENTS);

        Ok(Self {
            iterations: result.iterations,
            seed: result.seed,
            p50,
            p80: round(result.p80, CENTS, "p80")?,
            p90: round(result.p90, CENTS, "p90")?,
            mean: round(result.mean, CENTS, "mean")?,
            std_dev: round(result.std_dev, CENTS, "stdDev")?,
            min_value: round(result.min_value, CENTS, "minValue")?,
            max_value: round(result.max_value, CENTS, "maxValue")?,
            recommended_contingency,
            contingency_amount,
            recommended_budget: p50 + contingency_amount,
            top_risks: result
                .top_risks
                .iter()
                .map(RiskSummary::from_risk)
                .collect::<Result<_, _>>()?,
            histogram: result
                .histogram
                .iter()
                .map(BinSummary::from_bin)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl RiskSummary {
    fn from_risk(risk: &RiskFactor) -> Result<Self, EstimationError> {
        Ok(Self {
            item: risk.item.clone(),
            impact: round(risk.impact, CENTS, "topRisks.impact")?,
            probability: round(risk.probability, RATIO_DP, "topRisks.probability")?,
            sensitivity: round(risk.sensitivity, RATIO_DP, "topRisks.sensitivity")?,
        })
    }
}

impl BinSummary {
    fn from_bin(bin: &HistogramBin) -> Result<Self, EstimationError> {
        Ok(Self {
            range_low: round(bin.range_low, CENTS, "histogram.range_low")?,
            range_high: round(bin.range_high, CENTS, "histogram.range_high")?,
            count: bin.count,
            percentage: round(bin.percentage, CENTS, "histogram.percentage")?,
        })
    }
}

fn to_decimal(value: f64, field: &str) -> Result<Decimal, EstimationError> {
    Decimal::from_f64(value).ok_or_else(|| EstimationError::InvalidField {
        field: field.to_string(),
        reason: format!("{value} cannot be represented as a decimal"),
    })
}

fn round(value: f64, dp: u32, field: &str) -> Result<Decimal, EstimationError> {
    to_decimal(value, field).map(|d| round_decimal(d, dp))
}

fn round_decimal(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> MonteCarloResult {
        MonteCarloResult {
            iterations: 4,
            seed: 42,
            item_count: 2,
            p50: 10_000.004,
            p80: 11_000.0,
            p90: 11_500.126,
            mean: 10_200.0,
            std_dev: 812.3456,
            min_value: 9_000.0,
            max_value: 12_000.0,
            recommended_contingency: 9.999_96,
            top_risks: vec![RiskFactor {
                item_id: "cab".to_string(),
                item: "Cabinets".to_string(),
                impact: 700.555,
                probability: 0.123_456,
                sensitivity: 0.876_54,
            }],
            histogram: vec![
                HistogramBin { range_low: 9_000.0, range_high: 10_500.0, count: 1, percentage: 25.0 },
                HistogramBin { range_low: 10_500.0, range_high: 12_000.0, count: 3, percentage: 75.0 },
            ],
        }
    }

    #[test]
    fn rounds_currency_to_cents() {
        let summary = EstimateSummary::from_result(&result()).unwrap();
        assert_eq!(summary.p50, dec!(10000.00));
        assert_eq!(summary.p90, dec!(11500.13));
        assert_eq!(summary.std_dev, dec!(812.35));
        assert_eq!(summary.recommended_contingency, dec!(10.00));
        assert_eq!(summary.top_risks[0].probability, dec!(0.1235));
        assert_eq!(summary.top_risks[0].sensitivity, dec!(0.8765));
    }

    #[test]
    fn derives_contingency_amount_and_budget() {
        let summary = EstimateSummary::from_result(&result()).unwrap();
        // 10000.00 * 9.99996 / 100 = 999.996
        assert_eq!(summary.contingency_amount, dec!(1000.00));
        assert_eq!(summary.recommended_budget, dec!(11000.00));
    }

    #[test]
    fn serializes_with_pipeline_field_names() {
        let json = serde_json::to_value(EstimateSummary::from_result(&result()).unwrap()).unwrap();
        assert!(json.get("recommendedContingency").is_some());
        assert!(json.get("stdDev").is_some());
        assert_eq!(json["topRisks"][0]["item"], "Cabinets");
        assert!(json["topRisks"][0].get("impact").is_some());
        assert_eq!(json["histogram"][1]["count"], 3);
        assert!(json["histogram"][0].get("range_low").is_some());
        assert_eq!(json["p80"], 11000.0);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut broken = result();
        broken.mean = f64::NAN;
        assert!(matches!(
            EstimateSummary::from_result(&broken),
            Err(EstimationError::InvalidField { field, .. }) if field == "mean"
        ));
    }
}
