//! Display/report metrics derived from one gap result.

use serde::Serialize;

use crate::classify::Action;
use crate::types::{CategoryGap, MatchedEntry, PortfolioGap};

/// Count/extremum/aggregate metrics over one [`PortfolioGap`].
#[derive(Debug, Clone, Serialize)]
pub struct GapSummary {
    pub matched_count: usize,
    pub over_holding_count: usize,
    pub missing_target_count: usize,
    pub hold_count: usize,
    pub increase_count: usize,
    pub decrease_count: usize,
    /// Sum of |weight_gap| across matched entries.
    pub total_abs_drift: f64,
    /// Matched entry with the algebraically largest weight gap.
    pub max_overweight: Option<MatchedEntry>,
    /// Matched entry with the algebraically smallest weight gap.
    pub max_underweight: Option<MatchedEntry>,
    /// Category with the largest |gap|.
    pub worst_category: Option<WorstCategory>,
}

/// The category-gap entry singled out as worst by absolute gap.
#[derive(Debug, Clone, Serialize)]
pub struct WorstCategory {
    pub category: String,
    pub gap: CategoryGap,
}

/// Derive summary metrics from a gap result.
///
/// Extrema are computed as folds, not sorts: ties keep the first-encountered
/// entry, so the result is stable with respect to input order and the whole
/// pass stays linear.
pub fn summarize(gap: &PortfolioGap) -> GapSummary {
    let mut hold_count = 0;
    let mut increase_count = 0;
    let mut decrease_count = 0;
    let mut total_abs_drift = 0.0_f64;
    let mut max_overweight: Option<&MatchedEntry> = None;
    let mut max_underweight: Option<&MatchedEntry> = None;

    for entry in &gap.matched {
        match entry.action {
            Action::Hold => hold_count += 1,
            Action::Increase => increase_count += 1,
            Action::Decrease => decrease_count += 1,
        }
        total_abs_drift += entry.weight_gap.abs();

        match max_overweight {
            Some(best) if entry.weight_gap <= best.weight_gap => {}
            _ => max_overweight = Some(entry),
        }
        match max_underweight {
            Some(best) if entry.weight_gap >= best.weight_gap => {}
            _ => max_underweight = Some(entry),
        }
    }

    let mut worst_category: Option<(&String, &CategoryGap)> = None;
    for (category, cg) in &gap.category_gaps {
        match worst_category {
            Some((_, best)) if cg.gap.abs() <= best.gap.abs() => {}
            _ => worst_category = Some((category, cg)),
        }
    }

    GapSummary {
        matched_count: gap.matched.len(),
        over_holding_count: gap.over_holdings.len(),
        missing_target_count: gap.missing_targets.len(),
        hold_count,
        increase_count,
        decrease_count,
        total_abs_drift,
        max_overweight: max_overweight.cloned(),
        max_underweight: max_underweight.cloned(),
        worst_category: worst_category.map(|(category, cg)| WorstCategory {
            category: category.clone(),
            gap: *cg,
        }),
    }
}

/// Matched entries ranked by |weight_gap| descending, capped at `limit` rows
/// for display. Stable, so equal gaps keep their input order.
pub fn top_by_abs_gap(gap: &PortfolioGap, limit: usize) -> Vec<&MatchedEntry> {
    let mut entries: Vec<&MatchedEntry> = gap.matched.iter().collect();
    entries.sort_by(|a, b| {
        b.weight_gap
            .abs()
            .partial_cmp(&a.weight_gap.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(limit);
    entries
}
