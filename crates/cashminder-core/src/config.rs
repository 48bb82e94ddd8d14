//! Configuration for analytics thresholds and budget warnings
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/cashminder/config.toml)
//! 2. Embedded defaults (compiled into binary)
//!
//! Keys missing from an override file fall back one by one to the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/cashminder.toml");

/// Thresholds used by the aggregator and insight generator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Length of the monthly trend series
    pub trend_months: u32,
    /// Savings rate (percent) that must be exceeded for a positive insight
    pub savings_rate_target: f64,
    /// Percent growth a category must exceed to be reported
    pub category_increase_threshold: f64,
    /// Absolute percent change income must exceed to be reported
    pub income_change_threshold: f64,
    /// Color for categories that cannot be resolved
    pub unknown_category_color: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_months: 6,
            savings_rate_target: 20.0,
            category_increase_threshold: 15.0,
            income_change_threshold: 10.0,
            unknown_category_color: "#9CA3AF".to_string(),
        }
    }
}

/// Budget progress settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Percent spent at which a budget is flagged
    pub warning_percent: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            warning_percent: 80.0,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analytics: AnalyticsConfig,
    pub budgets: BudgetConfig,
}

impl Config {
    /// Load configuration (override first, then default)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::InvalidData(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => match default_config_path() {
                Some(path) if path.exists() => fs::read_to_string(&path).map_err(|e| {
                    Error::InvalidData(format!("Failed to read config: {}", e))
                })?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn validate(&self) -> Result<()> {
        if self.analytics.trend_months == 0 {
            return Err(Error::InvalidData(
                "analytics.trend_months must be at least 1".to_string(),
            ));
        }
        if self.budgets.warning_percent <= 0.0 {
            return Err(Error::InvalidData(
                "budgets.warning_percent must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get the default config path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("cashminder").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_defaults_match_code_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [analytics]
            trend_months = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.analytics.trend_months, 12);
        assert_eq!(config.analytics.savings_rate_target, 20.0);
        assert_eq!(config.budgets.warning_percent, 80.0);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::parse("[analytics\ntrend_months = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[budgets]\nwarning_percent = 90.0").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.budgets.warning_percent, 90.0);
        assert_eq!(config.analytics, AnalyticsConfig::default());
    }

    #[test]
    fn test_load_rejects_zero_trend_months() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analytics]\ntrend_months = 0").unwrap();

        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/cashminder.toml")));
        assert!(result.is_err());
    }
}
