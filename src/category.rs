//! Taxonomy-level weight aggregation: sector buckets for the domestic mode,
//! asset-class buckets for the global mode.
//!
//! The two variants deliberately differ on the "actual" side: the sector
//! variant buckets every domestic position (matched or not), while the
//! asset-class variant buckets only matched entries. Both sides are merged
//! over the union of categories; a category present on one side only gets 0
//! on the other.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::classify::finite_or_zero;
use crate::types::{CategoryGap, DomesticTarget, GlobalTarget, MatchedEntry, Position};

/// Catch-all bucket for instruments with no sector mapping.
pub const UNKNOWN_SECTOR: &str = "기타";

/// Sector label for a domestic position, resolved through name→code then
/// code→sector.
pub fn sector_of_position(
    position: &Position,
    name_to_code: &FxHashMap<String, String>,
    code_to_sector: &FxHashMap<String, String>,
) -> String {
    name_to_code
        .get(&position.name)
        .and_then(|code| code_to_sector.get(code))
        .cloned()
        .unwrap_or_else(|| UNKNOWN_SECTOR.to_string())
}

/// Sector label for a target code.
pub fn sector_of_code(code: &str, code_to_sector: &FxHashMap<String, String>) -> String {
    code_to_sector
        .get(code)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_SECTOR.to_string())
}

/// Domestic (sector) variant.
///
/// "Actual" is each position's share of total domestic evaluation amount,
/// bucketed by sector; "target" is each target's published weight fraction,
/// bucketed by sector. Over-holdings therefore still pull sector weight on
/// the actual side.
pub fn sector_category_gaps(
    domestic_positions: &[&Position],
    targets: &[DomesticTarget],
    name_to_code: &FxHashMap<String, String>,
    code_to_sector: &FxHashMap<String, String>,
) -> BTreeMap<String, CategoryGap> {
    let total_eval: f64 = domestic_positions.iter().map(|p| p.eval_or_zero()).sum();

    let mut actual: BTreeMap<String, f64> = BTreeMap::new();
    for &p in domestic_positions {
        let sector = sector_of_position(p, name_to_code, code_to_sector);
        *actual.entry(sector).or_insert(0.0) += finite_or_zero(p.eval_or_zero() / total_eval);
    }

    let mut target: BTreeMap<String, f64> = BTreeMap::new();
    for t in targets {
        let sector = sector_of_code(&t.code, code_to_sector);
        *target.entry(sector).or_insert(0.0) += finite_or_zero(t.weight_pct / 100.0);
    }

    merge_sides(actual, target)
}

/// Global (asset-class) variant.
///
/// "Actual" is computed only from matched entries' actual weights, bucketed
/// by the category each entry inherited from its target; "target" covers
/// every target with strictly positive published weight.
pub fn asset_class_category_gaps(
    matched: &[MatchedEntry],
    targets: &[GlobalTarget],
) -> BTreeMap<String, CategoryGap> {
    let mut actual: BTreeMap<String, f64> = BTreeMap::new();
    for entry in matched {
        *actual.entry(entry.category.clone()).or_insert(0.0) += entry.actual_weight;
    }

    let mut target: BTreeMap<String, f64> = BTreeMap::new();
    for t in targets.iter().filter(|t| t.weight_pct > 0.0) {
        *target.entry(t.category.clone()).or_insert(0.0) += finite_or_zero(t.weight_pct / 100.0);
    }

    merge_sides(actual, target)
}

/// Union the two sides into per-category gaps; an absent side reads as 0.
fn merge_sides(
    actual: BTreeMap<String, f64>,
    mut target: BTreeMap<String, f64>,
) -> BTreeMap<String, CategoryGap> {
    let mut out = BTreeMap::new();
    for (category, a) in actual {
        let t = target.remove(&category).unwrap_or(0.0);
        out.insert(
            category,
            CategoryGap {
                actual: a,
                target: t,
                gap: a - t,
            },
        );
    }
    for (category, t) in target {
        out.insert(
            category,
            CategoryGap {
                actual: 0.0,
                target: t,
                gap: -t,
            },
        );
    }
    out
}
