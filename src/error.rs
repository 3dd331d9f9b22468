//! Error types for the gap analysis crate.
//!
//! The analyzers themselves are total functions and never fail; errors only
//! arise at the input boundary when loading configuration or screener payloads.

use std::path::PathBuf;

/// All errors that can occur while loading engine inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("screener payload error: {0}")]
    Screener(String),

    #[error("failed to parse screener JSON: {0}")]
    ScreenerParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
