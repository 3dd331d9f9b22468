//! Global ETF gap analysis: held assets (domestic-listed and foreign) vs the
//! global multi-asset allocator's target portfolio.

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;

use crate::category::asset_class_category_gaps;
use crate::classify::{adjust_amount, classify_action, finite_or_zero};
use crate::config::GapConfig;
use crate::domestic::sanitize_capital;
use crate::matcher::{detail_map, match_global};
use crate::types::{
    Currency, GapMode, GlobalTarget, GlobalTargetDetail, MatchedEntry, MissingTarget, OverHolding,
    PortfolioGap, Position,
};

const GLOBAL_LABEL: &str = "global ETF allocation";

/// Compare held positions against the global ETF target portfolio.
///
/// Every position is a match candidate regardless of currency, but only
/// positions that are foreign-currency or tagged ETF/ETN/foreign-equity can
/// land in over-holdings — an unmatched domestic single stock belongs to the
/// domestic comparison, not here. Foreign-currency evaluation amounts are
/// converted to base currency at `fx_rate` before weighting.
pub fn analyze_global_gap(
    positions: &[Position],
    kr_portfolio: &[GlobalTarget],
    details: &[GlobalTargetDetail],
    capital: f64,
    fx_rate: f64,
    name_to_code: &FxHashMap<String, String>,
    config: &GapConfig,
) -> PortfolioGap {
    let divisor = sanitize_capital(capital);
    let fx = sanitize_fx_rate(fx_rate, config.fx_fallback);

    if kr_portfolio.is_empty() {
        return PortfolioGap {
            mode: GapMode::Global,
            label: GLOBAL_LABEL.to_string(),
            matched: Vec::new(),
            over_holdings: positions
                .iter()
                .filter(|p| p.is_global_scope())
                .map(OverHolding::from)
                .collect(),
            missing_targets: Vec::new(),
            category_gaps: BTreeMap::new(),
        };
    }

    let details_by_ticker = detail_map(details);

    let mut matched: Vec<MatchedEntry> = Vec::new();
    let mut claimed_tickers: FxHashSet<&str> = FxHashSet::default();
    let mut claimed_names: FxHashSet<&str> = FxHashSet::default();

    for position in positions {
        let Some(m) = match_global(
            position,
            kr_portfolio,
            &details_by_ticker,
            name_to_code,
            config.min_normalized_len,
        ) else {
            continue;
        };
        if claimed_tickers.contains(m.target.ticker.as_str()) {
            continue;
        }

        let eval_base = if position.currency == Currency::Foreign {
            position.eval_or_zero() * fx
        } else {
            position.eval_or_zero()
        };
        let actual_weight = finite_or_zero(eval_base / divisor);
        let target_weight = finite_or_zero(m.target.weight_pct / 100.0);
        let weight_gap = actual_weight - target_weight;

        matched.push(MatchedEntry {
            code: m.target.ticker.clone(),
            name: m.target.name.clone(),
            category: m.target.category.clone(),
            actual_weight,
            target_weight,
            weight_gap,
            score: m.detail.score,
            action: classify_action(weight_gap, config.tolerance),
            adjust_amount: adjust_amount(weight_gap, divisor),
        });
        claimed_tickers.insert(m.target.ticker.as_str());
        claimed_names.insert(position.name.as_str());
    }

    let over_holdings: Vec<OverHolding> = positions
        .iter()
        .filter(|p| !claimed_names.contains(p.name.as_str()) && p.is_global_scope())
        .map(OverHolding::from)
        .collect();

    let missing_targets: Vec<MissingTarget> = kr_portfolio
        .iter()
        .filter(|t| t.weight_pct > 0.0 && !claimed_tickers.contains(t.ticker.as_str()))
        .map(|t| MissingTarget {
            code: t.ticker.clone(),
            name: t.name.clone(),
            weight: finite_or_zero(t.weight_pct / 100.0),
            score: details_by_ticker
                .get(t.ticker.as_str())
                .and_then(|d| d.score),
            category: Some(t.category.clone()),
        })
        .collect();

    let category_gaps = asset_class_category_gaps(&matched, kr_portfolio);

    debug!(
        "global gap: {} matched, {} over-holdings, {} missing targets",
        matched.len(),
        over_holdings.len(),
        missing_targets.len()
    );

    PortfolioGap {
        mode: GapMode::Global,
        label: GLOBAL_LABEL.to_string(),
        matched,
        over_holdings,
        missing_targets,
        category_gaps,
    }
}

/// A non-finite or non-positive FX rate falls back to the configured default.
fn sanitize_fx_rate(fx_rate: f64, fallback: f64) -> f64 {
    if !fx_rate.is_finite() || fx_rate <= 0.0 {
        warn!("unusable fx rate {fx_rate}, falling back to {fallback}");
        fallback
    } else {
        fx_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Action;
    use crate::types::AssetKind;

    fn etf_pos(name: &str, eval: f64, ticker: Option<&str>) -> Position {
        Position {
            name: name.to_string(),
            quantity: 10.0,
            avg_price: eval / 10.0,
            currency: Currency::Domestic,
            eval_amount: Some(eval),
            kind: Some(AssetKind::Etf),
            ticker: ticker.map(str::to_string),
        }
    }

    fn foreign_pos(name: &str, eval: f64, ticker: &str) -> Position {
        Position {
            name: name.to_string(),
            quantity: 5.0,
            avg_price: eval / 5.0,
            currency: Currency::Foreign,
            eval_amount: Some(eval),
            kind: Some(AssetKind::ForeignEquity),
            ticker: Some(ticker.to_string()),
        }
    }

    fn domestic_stock(name: &str, eval: f64) -> Position {
        Position {
            name: name.to_string(),
            quantity: 10.0,
            avg_price: eval / 10.0,
            currency: Currency::Domestic,
            eval_amount: Some(eval),
            kind: Some(AssetKind::Equity),
            ticker: None,
        }
    }

    fn target(code: &str, name: &str, ticker: &str, category: &str, w: f64) -> GlobalTarget {
        GlobalTarget {
            code: code.to_string(),
            name: name.to_string(),
            ticker: ticker.to_string(),
            category: category.to_string(),
            weight_pct: w,
        }
    }

    fn detail(ticker: &str, score: Option<f64>) -> GlobalTargetDetail {
        GlobalTargetDetail {
            ticker: ticker.to_string(),
            score,
            label: ticker.to_string(),
        }
    }

    fn spy_portfolio() -> (Vec<GlobalTarget>, Vec<GlobalTargetDetail>) {
        (
            vec![target("360750", "TIGER 미국S&P500", "SPY", "주식", 40.0)],
            vec![detail("SPY", Some(0.9))],
        )
    }

    #[test]
    fn foreign_eval_is_converted() {
        let (targets, details) = spy_portfolio();
        // $1,000 at 1300 = 1,300,000 base units of 13,000,000 capital = 10%.
        let positions = vec![foreign_pos("SPDR S&P500", 1_000.0, "SPY")];
        let gap = analyze_global_gap(
            &positions,
            &targets,
            &details,
            13_000_000.0,
            1_300.0,
            &FxHashMap::default(),
            &GapConfig::default(),
        );

        let e = &gap.matched[0];
        assert!((e.actual_weight - 0.10).abs() < 1e-12);
        assert!((e.weight_gap - (0.10 - 0.40)).abs() < 1e-12);
        assert_eq!(e.action, Action::Increase);
        assert_eq!(e.score, Some(0.9));
    }

    #[test]
    fn domestic_listed_etf_is_not_converted() {
        let (targets, details) = spy_portfolio();
        let positions = vec![etf_pos("TIGER 미국S&P500", 4_000_000.0, None)];
        let gap = analyze_global_gap(
            &positions,
            &targets,
            &details,
            10_000_000.0,
            1_300.0,
            &FxHashMap::default(),
            &GapConfig::default(),
        );

        assert!((gap.matched[0].actual_weight - 0.40).abs() < 1e-12);
        assert_eq!(gap.matched[0].action, Action::Hold);
    }

    #[test]
    fn fx_fallback_applies() {
        let (targets, details) = spy_portfolio();
        let positions = vec![foreign_pos("SPDR S&P500", 1_000.0, "SPY")];
        for bad_fx in [f64::NAN, 0.0, -5.0] {
            let gap = analyze_global_gap(
                &positions,
                &targets,
                &details,
                13_000_000.0,
                bad_fx,
                &FxHashMap::default(),
                &GapConfig::default(),
            );
            // 1,000 * 1300 / 13,000,000 = 0.10 under the fallback rate.
            assert!((gap.matched[0].actual_weight - 0.10).abs() < 1e-12);
        }
    }

    #[test]
    fn unmatched_domestic_stock_is_not_an_over_holding() {
        let (targets, details) = spy_portfolio();
        let positions = vec![
            domestic_stock("삼성전자", 1_000_000.0),
            foreign_pos("정체불명ETF", 500.0, "XXXX"),
        ];
        let gap = analyze_global_gap(
            &positions,
            &targets,
            &details,
            10_000_000.0,
            1_300.0,
            &FxHashMap::default(),
            &GapConfig::default(),
        );

        assert!(gap.matched.is_empty());
        assert_eq!(gap.over_holdings.len(), 1);
        assert_eq!(gap.over_holdings[0].name, "정체불명ETF");
    }

    #[test]
    fn empty_portfolio_short_circuits_with_scoped_over_holdings() {
        let positions = vec![
            domestic_stock("삼성전자", 1_000_000.0),
            etf_pos("KODEX 200", 500_000.0, None),
            foreign_pos("SPDR S&P500", 1_000.0, "SPY"),
        ];
        let gap = analyze_global_gap(
            &positions,
            &[],
            &[],
            10_000_000.0,
            1_300.0,
            &FxHashMap::default(),
            &GapConfig::default(),
        );

        assert!(gap.matched.is_empty());
        let names: Vec<&str> = gap.over_holdings.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["KODEX 200", "SPDR S&P500"]);
        assert!(gap.missing_targets.is_empty());
        assert!(gap.category_gaps.is_empty());
    }

    #[test]
    fn zero_weight_targets_are_not_missing() {
        let targets = vec![
            target("360750", "TIGER 미국S&P500", "SPY", "주식", 40.0),
            target("132030", "KODEX 골드선물", "GLD", "원자재", 0.0),
        ];
        let details = vec![detail("SPY", None), detail("GLD", None)];
        let gap = analyze_global_gap(
            &[],
            &targets,
            &details,
            10_000_000.0,
            1_300.0,
            &FxHashMap::default(),
            &GapConfig::default(),
        );

        assert_eq!(gap.missing_targets.len(), 1);
        assert_eq!(gap.missing_targets[0].code, "SPY");
    }
}
