/// Typical construction-industry contingency band, in percent. Informational only.
pub const TYPICAL_RANGE_PCT: (f64, f64) = (5.0, 25.0);

/// Recommended contingency as a percentage of P50: `(p80 - p50) / p50 * 100`.
///
/// Returns 0 when `p50` is not positive. The value is not clamped to any range.
pub fn recommend_contingency(p50: f64, p80: f64) -> f64 {
    if p50 > 0.0 {
        (p80 - p50) / p50 * 100.0
    } else {
        0.0
    }
}

/// True when `pct` lies outside [`TYPICAL_RANGE_PCT`].
pub fn is_atypical(pct: f64) -> bool {
    let (low, high) = TYPICAL_RANGE_PCT;
    pct < low || pct > high
}
