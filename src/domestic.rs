//! Domestic-equity gap analysis: held domestic positions vs the momentum
//! screener's passed-target list.

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;

use crate::category::{sector_category_gaps, sector_of_code};
use crate::classify::{adjust_amount, classify_action, finite_or_zero};
use crate::config::GapConfig;
use crate::matcher::match_domestic;
use crate::types::{
    Currency, DomesticTarget, GapMode, MatchedEntry, MissingTarget, OverHolding, PortfolioGap,
    Position,
};

const DOMESTIC_LABEL: &str = "domestic momentum screener";

/// Compare held domestic-currency positions against the screener target list.
///
/// Foreign-currency holdings are out of scope here; they belong to the
/// global comparison. Matching is first-claim-wins in position input order:
/// a target already claimed by an earlier position counts as no match for a
/// later one, which then falls through to the over-holdings partition.
pub fn analyze_domestic_gap(
    positions: &[Position],
    targets: &[DomesticTarget],
    capital: f64,
    name_to_code: &FxHashMap<String, String>,
    code_to_sector: &FxHashMap<String, String>,
    config: &GapConfig,
) -> PortfolioGap {
    let divisor = sanitize_capital(capital);

    let domestic: Vec<&Position> = positions
        .iter()
        .filter(|p| p.currency == Currency::Domestic)
        .collect();

    if targets.is_empty() {
        return PortfolioGap {
            mode: GapMode::Domestic,
            label: DOMESTIC_LABEL.to_string(),
            matched: Vec::new(),
            over_holdings: domestic.iter().map(|p| OverHolding::from(*p)).collect(),
            missing_targets: Vec::new(),
            category_gaps: BTreeMap::new(),
        };
    }

    let mut matched: Vec<MatchedEntry> = Vec::new();
    let mut claimed_codes: FxHashSet<&str> = FxHashSet::default();
    let mut claimed_names: FxHashSet<&str> = FxHashSet::default();

    for &position in &domestic {
        let Some(target) = match_domestic(position, targets, name_to_code, config.min_normalized_len)
        else {
            continue;
        };
        if claimed_codes.contains(target.code.as_str()) {
            // A contested target stays with the earlier claimant; this
            // position falls through to over-holdings.
            continue;
        }

        let actual_weight = finite_or_zero(position.eval_or_zero() / divisor);
        let target_weight = finite_or_zero(target.weight_pct / 100.0);
        let weight_gap = actual_weight - target_weight;

        matched.push(MatchedEntry {
            code: target.code.clone(),
            name: target.name.clone(),
            category: sector_of_code(&target.code, code_to_sector),
            actual_weight,
            target_weight,
            weight_gap,
            score: target.momentum_score,
            action: classify_action(weight_gap, config.tolerance),
            adjust_amount: adjust_amount(weight_gap, divisor),
        });
        claimed_codes.insert(target.code.as_str());
        claimed_names.insert(position.name.as_str());
    }

    let over_holdings: Vec<OverHolding> = domestic
        .iter()
        .filter(|p| !claimed_names.contains(p.name.as_str()))
        .map(|p| OverHolding::from(*p))
        .collect();

    let missing_targets: Vec<MissingTarget> = targets
        .iter()
        .filter(|t| !claimed_codes.contains(t.code.as_str()))
        .map(|t| MissingTarget {
            code: t.code.clone(),
            name: t.name.clone(),
            weight: finite_or_zero(t.weight_pct / 100.0),
            score: t.momentum_score,
            category: Some(sector_of_code(&t.code, code_to_sector)),
        })
        .collect();

    let category_gaps = sector_category_gaps(&domestic, targets, name_to_code, code_to_sector);

    debug!(
        "domestic gap: {} matched, {} over-holdings, {} missing targets",
        matched.len(),
        over_holdings.len(),
        missing_targets.len()
    );

    PortfolioGap {
        mode: GapMode::Domestic,
        label: DOMESTIC_LABEL.to_string(),
        matched,
        over_holdings,
        missing_targets,
        category_gaps,
    }
}

/// Non-positive capital would poison every division; floor it to 1 and let
/// the caller surface the warning to the user.
pub(crate) fn sanitize_capital(capital: f64) -> f64 {
    if capital <= 0.0 {
        warn!("non-positive capital {capital}, using 1 as divisor");
        1.0
    } else {
        capital
    }
}
