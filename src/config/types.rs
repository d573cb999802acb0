//! Configuration types for the tip pool.
//!
//! These are deserialized from `pool.yaml` in a configuration directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TipRecord;

/// Default pay period length in days (biweekly).
pub const DEFAULT_PAY_PERIOD_DAYS: u32 = 14;

/// Default upper bound on the length of a pay period in days.
pub const DEFAULT_MAX_PERIOD_DAYS: u32 = 62;

/// A tip income source the pool collects from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipSourceConfig {
    /// The key used in tip records (e.g. "creditCard").
    pub key: String,
    /// A human-readable label (e.g. "Credit card").
    pub label: String,
}

impl TipSourceConfig {
    fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

fn default_pay_period_days() -> u32 {
    DEFAULT_PAY_PERIOD_DAYS
}

fn default_max_period_days() -> u32 {
    DEFAULT_MAX_PERIOD_DAYS
}

/// The tip pool configuration from `pool.yaml`.
///
/// # Example
///
/// ```
/// use tip_engine::config::PoolConfig;
///
/// let config: PoolConfig = serde_yaml::from_str(
///     "name: Bar staff\ntip_sources:\n  - key: cash\n    label: Cash\n",
/// )
/// .unwrap();
/// assert_eq!(config.pay_period_days, 14);
/// assert_eq!(config.empty_tips().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Display name of the pool.
    pub name: String,
    /// The tip sources, in display order.
    pub tip_sources: Vec<TipSourceConfig>,
    /// Length of a pay period when no end date is given.
    #[serde(default = "default_pay_period_days")]
    pub pay_period_days: u32,
    /// Longest pay period that may be built.
    #[serde(default = "default_max_period_days")]
    pub max_period_days: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: "Tip Pool".to_string(),
            tip_sources: vec![
                TipSourceConfig::new("cash", "Cash"),
                TipSourceConfig::new("app", "App"),
                TipSourceConfig::new("creditCard", "Credit card"),
            ],
            pay_period_days: DEFAULT_PAY_PERIOD_DAYS,
            max_period_days: DEFAULT_MAX_PERIOD_DAYS,
        }
    }
}

impl PoolConfig {
    /// A tip record with every configured source at zero.
    pub fn empty_tips(&self) -> TipRecord {
        self.tip_sources
            .iter()
            .fold(TipRecord::new(), |tips, source| {
                tips.with(source.key.clone(), Decimal::ZERO)
            })
    }

    /// Looks up a tip source by key.
    pub fn tip_source(&self, key: &str) -> Option<&TipSourceConfig> {
        self.tip_sources.iter().find(|s| s.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources() {
        let config = PoolConfig::default();
        let keys: Vec<&str> = config.tip_sources.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["cash", "app", "creditCard"]);
        assert_eq!(config.pay_period_days, 14);
    }

    #[test]
    fn test_empty_tips_follow_source_order() {
        let tips = PoolConfig::default().empty_tips();
        let keys: Vec<&str> = tips.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["cash", "app", "creditCard"]);
        assert!(tips.iter().all(|s| s.amount == Decimal::ZERO));
    }

    #[test]
    fn test_tip_source_lookup() {
        let config = PoolConfig::default();
        assert_eq!(config.tip_source("creditCard").unwrap().label, "Credit card");
        assert!(config.tip_source("venmo").is_none());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let yaml = r#"
name: Kitchen
tip_sources:
  - key: jar
    label: Tip jar
"#;
        let config: PoolConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "Kitchen");
        assert_eq!(config.pay_period_days, DEFAULT_PAY_PERIOD_DAYS);
        assert_eq!(config.max_period_days, DEFAULT_MAX_PERIOD_DAYS);
    }
}
