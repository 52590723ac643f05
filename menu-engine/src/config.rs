//! Engine configuration.
//!
//! Holds the fallbacks and factors that shape threshold derivation and
//! summary size. The thresholds themselves are never configured: they are
//! recomputed from the menu on every run.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::thresholds::{
    DEFAULT_FALLBACK_POPULARITY, DEFAULT_FALLBACK_PROFIT_MARGIN,
    DEFAULT_POPULARITY_THRESHOLD_FACTOR,
};

/// Number of dishes in each ranked summary list.
pub const DEFAULT_SUMMARY_SIZE: usize = 3;
/// Lowest profit margin accepted before clamping.
pub const DEFAULT_MIN_PROFIT_MARGIN: f64 = -100.0;
/// Highest profit margin accepted before clamping.
pub const DEFAULT_MAX_PROFIT_MARGIN: f64 = 100.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Average margin reported for a menu with no dishes.
    pub fallback_profit_margin: f64,
    /// Average popularity reported when no dish sold anything.
    pub fallback_popularity: f64,
    /// Share of average popularity a dish must reach to count as popular.
    pub popularity_threshold_factor: f64,
    pub summary_size: usize,
    pub min_profit_margin: f64,
    pub max_profit_margin: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_profit_margin: DEFAULT_FALLBACK_PROFIT_MARGIN,
            fallback_popularity: DEFAULT_FALLBACK_POPULARITY,
            popularity_threshold_factor: DEFAULT_POPULARITY_THRESHOLD_FACTOR,
            summary_size: DEFAULT_SUMMARY_SIZE,
            min_profit_margin: DEFAULT_MIN_PROFIT_MARGIN,
            max_profit_margin: DEFAULT_MAX_PROFIT_MARGIN,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(content).map_err(|e| {
            EngineError::Config(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !(self.popularity_threshold_factor.is_finite() && self.popularity_threshold_factor > 0.0)
        {
            return Err(EngineError::Config(format!(
                "popularity_threshold_factor must be positive, got {}",
                self.popularity_threshold_factor
            )));
        }
        if !(self.fallback_profit_margin.is_finite() && self.fallback_popularity.is_finite()) {
            return Err(EngineError::Config(
                "fallback averages must be finite".to_string(),
            ));
        }
        if !(self.min_profit_margin.is_finite()
            && self.max_profit_margin.is_finite()
            && self.min_profit_margin < self.max_profit_margin)
        {
            return Err(EngineError::Config(format!(
                "profit margin range [{}, {}] is invalid",
                self.min_profit_margin, self.max_profit_margin
            )));
        }
        if self.summary_size == 0 {
            return Err(EngineError::Config(
                "summary_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
