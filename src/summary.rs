use rayon::prelude::*;
use serde::Serialize;

use crate::types::Age;

/// One year of the output table: order statistics over the scenario
/// population plus the share of scenarios still solvent at that age.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub age: Age,
    pub worst: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p90: f64,
    pub best: f64,
    pub success_percent: f64,
}

/// Reduce one year's scenario balances to a summary row.
///
/// Percentiles interpolate linearly at rank `p·(n−1)` over the sorted
/// population, so the row is deterministic for a given balance vector.
/// Success counts scenarios strictly above zero.
pub fn summarize(age: Age, balances: &[f64]) -> SummaryRow {
    debug_assert!(!balances.is_empty());

    let mut sorted = balances.to_vec();
    sorted.par_sort_unstable_by(|a, b| a.total_cmp(b));
    let n = sorted.len();

    let interp = |p: f64| -> f64 {
        let h = p * (n - 1) as f64;
        let lo = h.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        let frac = h - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    };

    let solvent = sorted.iter().filter(|&&b| b > 0.0).count();

    SummaryRow {
        age,
        worst: sorted[0],
        p25: interp(0.25),
        median: interp(0.50),
        p75: interp(0.75),
        p90: interp(0.90),
        best: sorted[n - 1],
        success_percent: solvent as f64 / n as f64 * 100.0,
    }
}
