//! Day record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{HoursSheet, TipRecord};

/// Everything entered for one day of a pay period: the pooled tips and the
/// hours each employee worked.
///
/// # Example
///
/// ```
/// use tip_engine::models::DayRecord;
///
/// let day: DayRecord = serde_json::from_str(
///     r#"{"date": "2025-01-01", "tips": {"cash": 100}, "hours": {"a": 8, "b": 8}}"#,
/// )
/// .unwrap();
/// assert_eq!(day.hours.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The calendar date.
    pub date: NaiveDate,
    /// Tips collected that day.
    #[serde(default)]
    pub tips: TipRecord,
    /// Hours worked that day.
    #[serde(default)]
    pub hours: HoursSheet,
}

impl DayRecord {
    /// Creates a day with no tips and no hours.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            tips: TipRecord::new(),
            hours: HoursSheet::new(),
        }
    }
}
