//! TOML-based application configuration.
//!
//! Stores the few tunables the analytics pipeline exposes:
//! - Forecast horizon
//! - Default series window for history queries
//! - Demo seeding length
//!
//! Configuration is stored at `~/.config/studybalance/config.toml`.
//! Missing files and missing keys fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

use super::data_dir;

/// Forecasting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "default_min_days")]
    pub backtest_min_days: u32,
    #[serde(default = "default_refit_every")]
    pub backtest_refit_every: u32,
}

/// History query configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,
    #[serde(default = "default_seed_days")]
    pub seed_days: u32,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub series: SeriesConfig,
    /// Optional override for the mood database location.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

fn default_horizon_days() -> u32 {
    crate::forecast::DEFAULT_HORIZON_DAYS as u32
}
fn default_min_days() -> u32 {
    14
}
fn default_refit_every() -> u32 {
    7
}
fn default_window_days() -> u32 {
    120
}
fn default_seed_days() -> u32 {
    14
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            backtest_min_days: default_min_days(),
            backtest_refit_every: default_refit_every(),
        }
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            default_window_days: default_window_days(),
            seed_days: default_seed_days(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forecast: ForecastConfig::default(),
            series: SeriesConfig::default(),
            database_path: None,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config =
            toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(config)
    }

    /// Look up a value by its flat key (e.g. `"horizon_days"`).
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "horizon_days" => Some(self.forecast.horizon_days.to_string()),
            "backtest_min_days" => Some(self.forecast.backtest_min_days.to_string()),
            "backtest_refit_every" => Some(self.forecast.backtest_refit_every.to_string()),
            "default_window_days" => Some(self.series.default_window_days.to_string()),
            "seed_days" => Some(self.series.seed_days.to_string()),
            "database_path" => Some(
                self.database_path
                    .as_ref()
                    .map_or_else(|| "(default)".to_string(), |p| p.display().to_string()),
            ),
            _ => None,
        }
    }

    /// Update a value by key and persist the configuration.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_u32 = |value: &str| {
            value.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("'{value}' is not a whole number"),
            })
        };
        match key {
            "horizon_days" => self.forecast.horizon_days = parse_u32(value)?,
            "backtest_min_days" => self.forecast.backtest_min_days = parse_u32(value)?,
            "backtest_refit_every" => self.forecast.backtest_refit_every = parse_u32(value)?,
            "default_window_days" => self.series.default_window_days = parse_u32(value)?,
            "seed_days" => self.series.seed_days = parse_u32(value)?,
            "database_path" => self.database_path = Some(PathBuf::from(value)),
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "unknown key".to_string(),
                }
                .into())
            }
        }
        Ok(())
    }

    /// Persist the configuration.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_boundary_contract() {
        let config = Config::default();
        assert_eq!(config.forecast.horizon_days, 7);
        assert_eq!(config.forecast.backtest_min_days, 14);
        assert_eq!(config.forecast.backtest_refit_every, 7);
        assert_eq!(config.series.default_window_days, 120);
        assert_eq!(config.series.seed_days, 14);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[forecast]\nhorizon_days = 10\n").unwrap();
        assert_eq!(config.forecast.horizon_days, 10);
        assert_eq!(config.forecast.backtest_min_days, 14);
        assert_eq!(config.series.default_window_days, 120);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let raw = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back.forecast.horizon_days, config.forecast.horizon_days);
    }

    #[test]
    fn get_covers_every_settable_key() {
        let config = Config::default();
        for key in [
            "horizon_days",
            "backtest_min_days",
            "backtest_refit_every",
            "default_window_days",
            "seed_days",
            "database_path",
        ] {
            assert!(config.get(key).is_some(), "missing key {key}");
        }
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn apply_updates_numeric_keys() {
        let mut config = Config::default();
        config.apply("horizon_days", "10").unwrap();
        assert_eq!(config.forecast.horizon_days, 10);
        assert_eq!(config.get("horizon_days").unwrap(), "10");
        config.apply("seed_days", "30").unwrap();
        assert_eq!(config.series.seed_days, 30);
    }

    #[test]
    fn apply_sets_database_path() {
        let mut config = Config::default();
        config.apply("database_path", "/tmp/alt.db").unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/alt.db")));
        assert_eq!(config.get("database_path").unwrap(), "/tmp/alt.db");
    }

    #[test]
    fn apply_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.apply("horizon_days", "soon").is_err());
        assert!(config.apply("unknown_key", "1").is_err());
        // Failed updates leave the value untouched.
        assert_eq!(config.forecast.horizon_days, 7);
    }
}
