//! # gapfolio
//!
//! Portfolio gap analysis engine: reconciles a user's held positions against
//! the model portfolios produced by two screening strategies — a domestic
//! equity momentum screener and a global multi-asset ETF allocator — using
//! multi-tier fuzzy identity matching, weight-deviation classification, and
//! taxonomy-level aggregation.
//!
//! Every entry point is a pure, synchronous function over immutable inputs:
//! no I/O, no shared state, safe to call concurrently.
//!
//! ```
//! use gapfolio::{analyze_domestic_gap, Currency, DomesticTarget, GapConfig, Position};
//! use rustc_hash::FxHashMap;
//!
//! let positions = vec![Position {
//!     name: "삼성전자".into(),
//!     quantity: 13.0,
//!     avg_price: 76_900.0,
//!     currency: Currency::Domestic,
//!     eval_amount: Some(1_000_000.0),
//!     kind: None,
//!     ticker: None,
//! }];
//! let targets = vec![DomesticTarget {
//!     code: "005930".into(),
//!     name: "삼성전자".into(),
//!     weight_pct: 5.0,
//!     momentum_score: Some(3.1),
//!     passed: true,
//! }];
//! let mut name_to_code = FxHashMap::default();
//! name_to_code.insert("삼성전자".to_string(), "005930".to_string());
//!
//! let gap = analyze_domestic_gap(
//!     &positions,
//!     &targets,
//!     10_000_000.0,
//!     &name_to_code,
//!     &FxHashMap::default(),
//!     &GapConfig::default(),
//! );
//! assert_eq!(gap.matched.len(), 1);
//! assert!((gap.matched[0].weight_gap - 0.05).abs() < 1e-12);
//! ```

pub mod category;
pub mod classify;
pub mod combine;
pub mod config;
pub mod domestic;
pub mod error;
pub mod global;
pub mod matcher;
pub mod normalize;
pub mod screener;
pub mod summary;
pub mod types;

pub use classify::{Action, classify_action, finite_or_zero};
pub use combine::combine_gap_results;
pub use config::GapConfig;
pub use domestic::analyze_domestic_gap;
pub use error::{Error, Result};
pub use global::analyze_global_gap;
pub use matcher::{GlobalMatch, match_domestic, match_global};
pub use normalize::normalize_name;
pub use screener::{DomesticScreenerResult, GlobalScreenerResult};
pub use summary::{GapSummary, summarize, top_by_abs_gap};
pub use types::{
    AssetKind, CategoryGap, CombinedGapResult, Currency, DomesticTarget, GapMode, GlobalTarget,
    GlobalTargetDetail, MatchedEntry, MissingTarget, OverHolding, PortfolioGap, Position,
};
