//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the tip pool
//! configuration from a YAML file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, TipRecord};

use super::types::{PoolConfig, TipSourceConfig};

/// Loads, validates and provides access to the tip pool configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── pool.yaml   # Pool name, tip sources and pay period lengths
/// ```
///
/// # Example
///
/// ```no_run
/// use tip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Loaded pool: {}", loader.name());
/// # Ok::<(), tip_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PoolConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `pool.yaml` is missing
    /// - `ConfigParseError` if it is not valid YAML for a [`PoolConfig`]
    /// - `InvalidConfig` if it parses but fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let pool_path = path.as_ref().join("pool.yaml");
        let config = Self::load_yaml(&pool_path)?;
        Self::from_config(config)
    }

    /// Wraps an in-memory configuration after validating it.
    pub fn from_config(config: PoolConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &PoolConfig) -> EngineResult<()> {
        if config.tip_sources.is_empty() {
            return Err(EngineError::InvalidConfig {
                field: "tip_sources".to_string(),
                message: "at least one tip source is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for source in &config.tip_sources {
            if source.key.trim().is_empty() {
                return Err(EngineError::InvalidConfig {
                    field: "tip_sources".to_string(),
                    message: "tip source keys must not be blank".to_string(),
                });
            }
            if !seen.insert(source.key.as_str()) {
                return Err(EngineError::InvalidConfig {
                    field: "tip_sources".to_string(),
                    message: format!("duplicate tip source key '{}'", source.key),
                });
            }
        }

        if config.pay_period_days == 0 {
            return Err(EngineError::InvalidConfig {
                field: "pay_period_days".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if config.max_period_days < config.pay_period_days {
            return Err(EngineError::InvalidConfig {
                field: "max_period_days".to_string(),
                message: format!(
                    "{} is shorter than pay_period_days ({})",
                    config.max_period_days, config.pay_period_days
                ),
            });
        }

        Ok(())
    }

    /// Returns the underlying pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the pool's display name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the configured tip sources in display order.
    pub fn tip_sources(&self) -> &[TipSourceConfig] {
        &self.config.tip_sources
    }

    /// Returns the default pay period length in days.
    pub fn pay_period_days(&self) -> u32 {
        self.config.pay_period_days
    }

    /// Returns a tip record with every configured source at zero.
    pub fn empty_tips(&self) -> TipRecord {
        self.config.empty_tips()
    }

    /// Builds an empty pay period using the configured lengths and sources.
    pub fn build_period(
        &self,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> EngineResult<PayPeriod> {
        PayPeriod::new(start_date, end_date, &self.config)
    }
}
