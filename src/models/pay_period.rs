//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: a contiguous run of
//! [`DayRecord`]s that are aggregated together into period totals.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{DayRecord, PeriodTotals};
use crate::calculation::aggregate;
use crate::config::PoolConfig;
use crate::error::{EngineError, EngineResult};

/// A pay period with one record per calendar day.
///
/// # Example
///
/// ```
/// use tip_engine::config::PoolConfig;
/// use tip_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let config = PoolConfig::default();
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let period = PayPeriod::new(start, None, &config).unwrap();
///
/// assert_eq!(period.days.len(), 14);
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 1, 14).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// One record per day, in date order.
    pub days: Vec<DayRecord>,
}

impl PayPeriod {
    /// Builds an empty pay period.
    ///
    /// Without an `end_date` the period runs for the configured default
    /// length. Reversed bounds are swapped. Every day starts with each
    /// configured tip source at zero and no hours.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if the period would be longer than the
    /// configured maximum or runs past the end of the calendar.
    pub fn new(
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        config: &PoolConfig,
    ) -> EngineResult<Self> {
        let (start, end) = match end_date {
            Some(end) if end < start_date => (end, start_date),
            Some(end) => (start_date, end),
            None => {
                let offset = u64::from(config.pay_period_days.saturating_sub(1));
                let end = start_date.checked_add_days(Days::new(offset)).ok_or_else(|| {
                    EngineError::InvalidPeriod {
                        message: format!("period starting {} runs past the calendar", start_date),
                    }
                })?;
                (start_date, end)
            }
        };

        let length = (end - start).num_days() + 1;
        if length > i64::from(config.max_period_days) {
            return Err(EngineError::InvalidPeriod {
                message: format!(
                    "period {} to {} spans {} days, more than the maximum of {}",
                    start, end, length, config.max_period_days
                ),
            });
        }

        let empty_tips = config.empty_tips();
        let days = start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| DayRecord {
                tips: empty_tips.clone(),
                ..DayRecord::empty(date)
            })
            .collect();

        Ok(Self {
            start_date: start,
            end_date: end,
            days,
        })
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the record for a date, if it belongs to this period.
    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut DayRecord> {
        self.days.iter_mut().find(|d| d.date == date)
    }

    /// Aggregates every day of the period.
    pub fn totals(&self) -> PeriodTotals {
        aggregate(&self.days)
    }
}
