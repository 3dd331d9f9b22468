//! Merging the two optional per-mode results into one envelope.

use crate::types::{CombinedGapResult, PortfolioGap};

/// Merge the per-mode results with the capital/FX context they were computed
/// under. Pure structural merge; either screener may have produced no usable
/// target list, leaving its side `None`.
pub fn combine_gap_results(
    domestic: Option<PortfolioGap>,
    global: Option<PortfolioGap>,
    capital: f64,
    fx_rate: f64,
) -> CombinedGapResult {
    CombinedGapResult {
        domestic,
        global,
        capital,
        fx_rate,
    }
}
