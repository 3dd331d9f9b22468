//! Analyzer configuration loading and defaults.
//!
//! The classification tolerance, FX fallback rate, and display truncation
//! limits live here rather than as buried literals so boundary conditions
//! can be tested explicitly.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Tunable parameters for the gap analyzers.
#[derive(Debug, Clone, Deserialize)]
pub struct GapConfig {
    /// Weight-gap band (fraction of capital) inside which a matched position
    /// is classified as Hold. Default 0.005 = 0.5 percentage points.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// FX rate (foreign-per-base) used when the supplied rate is non-finite
    /// or non-positive.
    #[serde(default = "default_fx_fallback")]
    pub fx_fallback: f64,

    /// Normalized names shorter than this never participate in the fuzzy
    /// substring tier. Guards against spurious short-token matches.
    #[serde(default = "default_min_normalized_len")]
    pub min_normalized_len: usize,

    /// Row cap for display-oriented truncation of matched entries.
    #[serde(default = "default_max_display_rows")]
    pub max_display_rows: usize,
}

fn default_tolerance() -> f64 {
    0.005
}
fn default_fx_fallback() -> f64 {
    1300.0
}
fn default_min_normalized_len() -> usize {
    2
}
fn default_max_display_rows() -> usize {
    30
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            fx_fallback: default_fx_fallback(),
            min_normalized_len: default_min_normalized_len(),
            max_display_rows: default_max_display_rows(),
        }
    }
}

impl GapConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GapConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a TOML string (useful for testing).
    pub fn from_toml(s: &str) -> Result<Self> {
        let config: GapConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::Config(format!(
                "tolerance must be a non-negative finite number, got {}",
                self.tolerance
            )));
        }
        if !self.fx_fallback.is_finite() || self.fx_fallback <= 0.0 {
            return Err(Error::Config(format!(
                "fx_fallback must be a positive finite number, got {}",
                self.fx_fallback
            )));
        }
        Ok(())
    }
}
