//! Typed envelopes for the two screener services' result payloads.
//!
//! The screeners themselves are external; this module only deserializes and
//! validates what they hand back before the analyzers consume it.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{DomesticTarget, GlobalTarget, GlobalTargetDetail};

/// Result payload of the domestic equity momentum screener.
#[derive(Debug, Clone, Deserialize)]
pub struct DomesticScreenerResult {
    pub generated_at: DateTime<Utc>,
    pub passed_stocks: Vec<DomesticTarget>,
    #[serde(default)]
    pub target_count: Option<usize>,
}

impl DomesticScreenerResult {
    /// Parse and validate a screener result from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let result: DomesticScreenerResult = serde_json::from_str(json)?;
        result.validate()?;
        Ok(result)
    }

    /// Targets flagged as having passed the screen, in published order.
    pub fn passed_targets(&self) -> Vec<DomesticTarget> {
        self.passed_stocks
            .iter()
            .filter(|t| t.passed)
            .cloned()
            .collect()
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for t in &self.passed_stocks {
            if t.code.is_empty() {
                return Err(Error::Screener(format!("empty code for '{}'", t.name)));
            }
            if !seen.insert(&t.code) {
                return Err(Error::Screener(format!("duplicate code: {}", t.code)));
            }
            if !t.weight_pct.is_finite() || t.weight_pct < 0.0 {
                return Err(Error::Screener(format!(
                    "weight for {} ({}) must be a non-negative finite percentage",
                    t.code, t.weight_pct
                )));
            }
        }
        Ok(())
    }
}

/// Result payload of the global multi-asset ETF allocator.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalScreenerResult {
    pub generated_at: DateTime<Utc>,
    pub kr_portfolio: Vec<GlobalTarget>,
    #[serde(default)]
    pub global_etf_details: Vec<GlobalTargetDetail>,
}

impl GlobalScreenerResult {
    /// Parse and validate an allocator result from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let result: GlobalScreenerResult = serde_json::from_str(json)?;
        result.validate()?;
        Ok(result)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for t in &self.kr_portfolio {
            if t.ticker.is_empty() {
                return Err(Error::Screener(format!("empty ticker for '{}'", t.name)));
            }
            if !seen.insert(&t.ticker) {
                return Err(Error::Screener(format!("duplicate ticker: {}", t.ticker)));
            }
            if !t.weight_pct.is_finite() || t.weight_pct < 0.0 {
                return Err(Error::Screener(format!(
                    "weight for {} ({}) must be a non-negative finite percentage",
                    t.ticker, t.weight_pct
                )));
            }
        }
        for d in &self.global_etf_details {
            if d.ticker.is_empty() {
                return Err(Error::Screener("detail record with empty ticker".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domestic_json() -> &'static str {
        r#"{
            "generated_at": "2026-08-20T06:00:00Z",
            "passed_stocks": [
                { "code": "005930", "name": "삼성전자", "weight_pct": 12.0, "momentum_score": 3.1 },
                { "code": "000660", "name": "SK하이닉스", "weight_pct": 9.5, "passed": false }
            ],
            "target_count": 20
        }"#
    }

    #[test]
    fn parse_domestic_result() {
        let r = DomesticScreenerResult::from_json(domestic_json()).unwrap();
        assert_eq!(r.passed_stocks.len(), 2);
        assert_eq!(r.passed_stocks[0].momentum_score, Some(3.1));
        assert_eq!(r.target_count, Some(20));
    }

    #[test]
    fn passed_filter_drops_failed_rows() {
        let r = DomesticScreenerResult::from_json(domestic_json()).unwrap();
        let passed = r.passed_targets();
        assert_eq!(passed.len(), 1);
        assert_eq!(passed[0].code, "005930");
    }

    #[test]
    fn missing_score_stays_none() {
        let json = r#"{
            "generated_at": "2026-08-20T06:00:00Z",
            "passed_stocks": [
                { "code": "005930", "name": "삼성전자", "weight_pct": 12.0 }
            ]
        }"#;
        let r = DomesticScreenerResult::from_json(json).unwrap();
        assert_eq!(r.passed_stocks[0].momentum_score, None);
    }

    #[test]
    fn reject_duplicate_codes() {
        let json = r#"{
            "generated_at": "2026-08-20T06:00:00Z",
            "passed_stocks": [
                { "code": "005930", "name": "삼성전자", "weight_pct": 12.0 },
                { "code": "005930", "name": "삼성전자", "weight_pct": 3.0 }
            ]
        }"#;
        assert!(DomesticScreenerResult::from_json(json).is_err());
    }

    #[test]
    fn reject_non_finite_weight() {
        let json = r#"{
            "generated_at": "2026-08-20T06:00:00Z",
            "passed_stocks": [
                { "code": "005930", "name": "삼성전자", "weight_pct": -1.0 }
            ]
        }"#;
        assert!(DomesticScreenerResult::from_json(json).is_err());
    }

    #[test]
    fn parse_global_result() {
        let json = r#"{
            "generated_at": "2026-08-20T06:00:00Z",
            "kr_portfolio": [
                { "code": "360750", "name": "TIGER 미국S&P500", "ticker": "SPY",
                  "category": "주식", "weight_pct": 40.0 }
            ],
            "global_etf_details": [
                { "ticker": "SPY", "score": 0.82, "label": "S&P 500" }
            ]
        }"#;
        let r = GlobalScreenerResult::from_json(json).unwrap();
        assert_eq!(r.kr_portfolio.len(), 1);
        assert_eq!(r.global_etf_details[0].score, Some(0.82));
    }

    #[test]
    fn reject_duplicate_tickers() {
        let json = r#"{
            "generated_at": "2026-08-20T06:00:00Z",
            "kr_portfolio": [
                { "code": "360750", "name": "A", "ticker": "SPY", "category": "주식", "weight_pct": 40.0 },
                { "code": "360751", "name": "B", "ticker": "SPY", "category": "주식", "weight_pct": 10.0 }
            ]
        }"#;
        assert!(GlobalScreenerResult::from_json(json).is_err());
    }

    #[test]
    fn details_default_to_empty() {
        let json = r#"{
            "generated_at": "2026-08-20T06:00:00Z",
            "kr_portfolio": []
        }"#;
        let r = GlobalScreenerResult::from_json(json).unwrap();
        assert!(r.global_etf_details.is_empty());
    }
}
