//! Weight-gap classification into a tri-state rebalancing action.

use serde::Serialize;

/// Rebalancing direction for a matched position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Hold,
    Increase,
    Decrease,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Hold => write!(f, "HOLD"),
            Action::Increase => write!(f, "INCREASE"),
            Action::Decrease => write!(f, "DECREASE"),
        }
    }
}

/// Defuse a weight value: NaN and ±Infinity become 0.
///
/// Applied to every actual/target weight before gap computation so a
/// malformed capital or evaluation amount can never propagate non-finite
/// values downstream.
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// Classify a signed weight gap against a symmetric tolerance band.
///
/// Overweight beyond the band means the position should be trimmed
/// (Decrease); underweight beyond the band means it should be topped up
/// (Increase). Exactly on the band edge is still Hold.
pub fn classify_action(weight_gap: f64, tolerance: f64) -> Action {
    if weight_gap > tolerance {
        Action::Decrease
    } else if weight_gap < -tolerance {
        Action::Increase
    } else {
        Action::Hold
    }
}

/// Absolute base-currency amount to trade to close a weight gap.
pub fn adjust_amount(weight_gap: f64, capital: f64) -> f64 {
    weight_gap.abs() * capital
}
