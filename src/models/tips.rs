//! Tip record model.
//!
//! A [`TipRecord`] holds one day's tip income as an ordered list of named,
//! additive sources. The engine does not assume any particular source names.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calculation::coerce_amount;

/// A single tip income source for one day (e.g. cash or card tips).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipSource {
    /// The source key (e.g. "cash", "app", "creditCard").
    pub key: String,
    /// The dollar amount collected from this source.
    pub amount: Decimal,
}

/// One day's tip income across all sources.
///
/// Serialized as a JSON object keyed by source name. When deserializing,
/// values may be numbers, numeric strings, blanks or null; anything that is
/// not a non-negative number reads as zero.
///
/// # Example
///
/// ```
/// use tip_engine::models::TipRecord;
/// use rust_decimal::Decimal;
///
/// let tips: TipRecord =
///     serde_json::from_str(r#"{"cash": 50, "app": "12.50", "creditCard": ""}"#).unwrap();
///
/// assert_eq!(tips.amount("app"), Some(Decimal::new(1250, 2)));
/// assert_eq!(tips.amount("creditCard"), Some(Decimal::ZERO));
/// assert_eq!(tips.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TipRecord {
    sources: Vec<TipSource>,
}

impl TipRecord {
    /// Creates an empty tip record with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this record with `key` set to `amount`.
    pub fn with(mut self, key: impl Into<String>, amount: Decimal) -> Self {
        self.set(key, amount);
        self
    }

    /// Sets the amount for a source, keeping its position if already present.
    pub fn set(&mut self, key: impl Into<String>, amount: Decimal) {
        let key = key.into();
        match self.sources.iter_mut().find(|s| s.key == key) {
            Some(source) => source.amount = amount,
            None => self.sources.push(TipSource { key, amount }),
        }
    }

    /// Returns the amount recorded for a source, if the source is present.
    pub fn amount(&self, key: &str) -> Option<Decimal> {
        self.sources.iter().find(|s| s.key == key).map(|s| s.amount)
    }

    /// Iterates over the sources in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &TipSource> {
        self.sources.iter()
    }

    /// Returns the number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if no sources are recorded.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Serialize for TipRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sources.len()))?;
        for source in &self.sources {
            map.serialize_entry(&source.key, &source.amount)?;
        }
        map.end()
    }
}

struct TipRecordVisitor;

impl<'de> Visitor<'de> for TipRecordVisitor {
    type Value = TipRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of tip source names to amounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut record = TipRecord::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            record.set(key, coerce_amount(&value));
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for TipRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TipRecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_builder_keeps_insertion_order() {
        let tips = TipRecord::new()
            .with("cash", dec("10"))
            .with("app", dec("5"))
            .with("creditCard", dec("2.50"));

        let keys: Vec<&str> = tips.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["cash", "app", "creditCard"]);
    }

    #[test]
    fn test_set_replaces_existing_source_in_place() {
        let mut tips = TipRecord::new().with("cash", dec("10")).with("app", dec("5"));
        tips.set("cash", dec("12"));

        assert_eq!(tips.len(), 2);
        assert_eq!(tips.amount("cash"), Some(dec("12")));
        assert_eq!(tips.iter().next().unwrap().key, "cash");
    }

    #[test]
    fn test_deserialize_coerces_untyped_values() {
        let json = r#"{"cash": "40.25", "app": null, "creditCard": "oops", "jar": -3}"#;
        let tips: TipRecord = serde_json::from_str(json).unwrap();

        assert_eq!(tips.amount("cash"), Some(dec("40.25")));
        assert_eq!(tips.amount("app"), Some(Decimal::ZERO));
        assert_eq!(tips.amount("creditCard"), Some(Decimal::ZERO));
        assert_eq!(tips.amount("jar"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_deserialize_preserves_document_order() {
        let json = r#"{"zeta": 1, "alpha": 2, "mid": 3}"#;
        let tips: TipRecord = serde_json::from_str(json).unwrap();

        let keys: Vec<&str> = tips.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_serialize_as_object() {
        let tips = TipRecord::new().with("cash", dec("50")).with("app", dec("0"));
        let json = serde_json::to_string(&tips).unwrap();
        assert_eq!(json, r#"{"cash":"50","app":"0"}"#);
    }

    #[test]
    fn test_missing_source_returns_none() {
        let tips = TipRecord::new().with("cash", dec("1"));
        assert_eq!(tips.amount("app"), None);
        assert!(!tips.is_empty());
        assert!(TipRecord::new().is_empty());
    }
}
