//! Data model: held positions, screener targets, and analysis results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::Action;

/// Settlement currency of a held position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Domestic,
    Foreign,
}

/// Broad asset-type tag carried on a position by the upstream ingestion layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Equity,
    Etf,
    Etn,
    ForeignEquity,
    Bond,
    Other,
}

/// A held position from the brokerage export. Immutable for the duration of
/// one analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub name: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub currency: Currency,
    #[serde(default)]
    pub eval_amount: Option<f64>,
    #[serde(default)]
    pub kind: Option<AssetKind>,
    #[serde(default)]
    pub ticker: Option<String>,
}

impl Position {
    /// Evaluation amount in the position's own currency, 0 when absent.
    pub fn eval_or_zero(&self) -> f64 {
        self.eval_amount.unwrap_or(0.0)
    }

    /// True if the global mode treats this position as in-scope for the
    /// over-holdings partition: foreign-currency, or tagged as an ETF/ETN/
    /// foreign-equity instrument.
    pub fn is_global_scope(&self) -> bool {
        self.currency == Currency::Foreign
            || matches!(
                self.kind,
                Some(AssetKind::Etf | AssetKind::Etn | AssetKind::ForeignEquity)
            )
    }
}

/// One row of the domestic momentum screener's passed-target list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomesticTarget {
    pub code: String,
    pub name: String,
    /// Published weight in percentage points.
    pub weight_pct: f64,
    #[serde(default)]
    pub momentum_score: Option<f64>,
    #[serde(default = "default_passed")]
    pub passed: bool,
}

fn default_passed() -> bool {
    true
}

/// One row of the global ETF allocator's target portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalTarget {
    /// Domestic-market listing code.
    pub code: String,
    /// Domestic-market display name.
    pub name: String,
    /// Global ticker, key into the detail list.
    pub ticker: String,
    /// Asset-class category tag.
    pub category: String,
    /// Published weight in percentage points.
    pub weight_pct: f64,
}

/// Descriptive metadata for a global target, keyed by global ticker. A
/// target is only matchable when a detail record exists for its ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalTargetDetail {
    pub ticker: String,
    #[serde(default)]
    pub score: Option<f64>,
    pub label: String,
}

/// Which comparison produced a [`PortfolioGap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapMode {
    Domestic,
    Global,
}

impl std::fmt::Display for GapMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GapMode::Domestic => write!(f, "domestic"),
            GapMode::Global => write!(f, "global"),
        }
    }
}

/// One resolved held-position / target pairing. All weights are fractions of
/// capital; `weight_gap = actual_weight - target_weight`.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedEntry {
    /// Target code (domestic mode) or global ticker (global mode).
    pub code: String,
    pub name: String,
    /// Sector (domestic) or asset-class (global) label.
    pub category: String,
    pub actual_weight: f64,
    pub target_weight: f64,
    pub weight_gap: f64,
    /// Momentum score (domestic) or detail score (global), when published.
    pub score: Option<f64>,
    pub action: Action,
    /// Absolute rebalancing amount in base-currency units.
    pub adjust_amount: f64,
}

/// A held position with no resolved target in its mode.
#[derive(Debug, Clone, Serialize)]
pub struct OverHolding {
    pub name: String,
    pub eval_amount: f64,
    pub currency: Currency,
    pub kind: Option<AssetKind>,
}

impl From<&Position> for OverHolding {
    fn from(p: &Position) -> Self {
        Self {
            name: p.name.clone(),
            eval_amount: p.eval_or_zero(),
            currency: p.currency,
            kind: p.kind,
        }
    }
}

/// A target-list entry with no resolved held position.
#[derive(Debug, Clone, Serialize)]
pub struct MissingTarget {
    pub code: String,
    pub name: String,
    /// Target weight as a fraction of capital.
    pub weight: f64,
    pub score: Option<f64>,
    pub category: Option<String>,
}

/// Actual-vs-target weight deviation for one taxonomy bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryGap {
    pub actual: f64,
    pub target: f64,
    pub gap: f64,
}

/// Per-mode analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioGap {
    pub mode: GapMode,
    /// Human label for the target portfolio being compared against.
    pub label: String,
    pub matched: Vec<MatchedEntry>,
    pub over_holdings: Vec<OverHolding>,
    pub missing_targets: Vec<MissingTarget>,
    /// Keyed by sector (domestic) or asset class (global). A BTreeMap keeps
    /// iteration deterministic for reporting and tie-breaking.
    pub category_gaps: BTreeMap<String, CategoryGap>,
}

/// Both mode results plus the capital/FX context they were computed under.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedGapResult {
    pub domestic: Option<PortfolioGap>,
    pub global: Option<PortfolioGap>,
    pub capital: f64,
    pub fx_rate: f64,
}
