//! Fuzzy identity resolution between held positions and screener targets.
//!
//! Each matcher is an ordered chain of independent tiers, highest confidence
//! first, short-circuited at the first hit. A tier that finds nothing hands
//! off to the next; a fully exhausted chain means "no match", which the
//! analyzers represent as an over-holding rather than an error.

use rustc_hash::FxHashMap;

use crate::normalize::normalize_name;
use crate::types::{DomesticTarget, GlobalTarget, GlobalTargetDetail, Position};

/// A resolved global pairing: the target row plus its gating detail record.
#[derive(Debug, Clone, Copy)]
pub struct GlobalMatch<'a> {
    pub target: &'a GlobalTarget,
    pub detail: &'a GlobalTargetDetail,
}

/// True for a 6-digit numeric instrument code (KRX listing code shape).
pub fn is_listing_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Build the ticker-keyed detail lookup the global matcher gates on.
pub fn detail_map(details: &[GlobalTargetDetail]) -> FxHashMap<&str, &GlobalTargetDetail> {
    details.iter().map(|d| (d.ticker.as_str(), d)).collect()
}

/// Resolve a domestic position to a screener target.
///
/// Tiers, first hit wins:
/// 1. code — name→code map lookup, 6-digit codes only;
/// 2. exact display-name equality;
/// 3. normalized mutual-substring, both sides at least `min_normalized_len`.
pub fn match_domestic<'a>(
    position: &Position,
    targets: &'a [DomesticTarget],
    name_to_code: &FxHashMap<String, String>,
    min_normalized_len: usize,
) -> Option<&'a DomesticTarget> {
    domestic_by_code(position, targets, name_to_code)
        .or_else(|| targets.iter().find(|t| t.name == position.name))
        .or_else(|| {
            targets
                .iter()
                .find(|t| normalized_overlap(&position.name, &t.name, min_normalized_len))
        })
}

fn domestic_by_code<'a>(
    position: &Position,
    targets: &'a [DomesticTarget],
    name_to_code: &FxHashMap<String, String>,
) -> Option<&'a DomesticTarget> {
    let code = name_to_code.get(&position.name)?;
    if !is_listing_code(code) {
        return None;
    }
    targets.iter().find(|t| t.code == *code)
}

/// Resolve a position (domestic or foreign) to a global ETF target.
///
/// A candidate is only usable if a detail record exists for its global
/// ticker; a candidate without one is skipped as if it were not found.
///
/// Tiers, first hit wins:
/// 1. resolved ticker vs global ticker, case-insensitive;
/// 2. name→code map lookup vs domestic code;
/// 3. exact display-name equality;
/// 4. normalized mutual-substring, minimum length as in the domestic chain.
pub fn match_global<'a>(
    position: &Position,
    kr_portfolio: &'a [GlobalTarget],
    details: &FxHashMap<&str, &'a GlobalTargetDetail>,
    name_to_code: &FxHashMap<String, String>,
    min_normalized_len: usize,
) -> Option<GlobalMatch<'a>> {
    if let Some(ticker) = position.ticker.as_deref() {
        if let Some(m) = find_usable(kr_portfolio, details, |t| {
            t.ticker.eq_ignore_ascii_case(ticker)
        }) {
            return Some(m);
        }
    }
    if let Some(code) = name_to_code.get(&position.name) {
        if let Some(m) = find_usable(kr_portfolio, details, |t| t.code == *code) {
            return Some(m);
        }
    }
    if let Some(m) = find_usable(kr_portfolio, details, |t| t.name == position.name) {
        return Some(m);
    }
    find_usable(kr_portfolio, details, |t| {
        normalized_overlap(&position.name, &t.name, min_normalized_len)
    })
}

/// First target satisfying the predicate that also has a detail record.
fn find_usable<'a>(
    kr_portfolio: &'a [GlobalTarget],
    details: &FxHashMap<&str, &'a GlobalTargetDetail>,
    pred: impl Fn(&GlobalTarget) -> bool,
) -> Option<GlobalMatch<'a>> {
    kr_portfolio.iter().find_map(|target| {
        if !pred(target) {
            return None;
        }
        details
            .get(target.ticker.as_str())
            .copied()
            .map(|detail| GlobalMatch { target, detail })
    })
}

/// Mutual-substring test over normalized names. Either side shorter than
/// `min_len` (in characters) disqualifies the pair outright.
fn normalized_overlap(a: &str, b: &str, min_len: usize) -> bool {
    let na = normalize_name(a);
    let nb = normalize_name(b);
    if na.chars().count() < min_len || nb.chars().count() < min_len {
        return false;
    }
    na.contains(&nb) || nb.contains(&na)
}
