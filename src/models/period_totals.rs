//! Pay period totals model.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Shares;
use crate::calculation::cents_to_dollars;

/// The result of aggregating a pay period.
///
/// `by_employee` holds each employee's cent-exact total over the period, in
/// order of first appearance, omitting employees who earned nothing.
/// `by_day` holds each day's split keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Per-employee totals across the whole period.
    pub by_employee: Shares,
    /// Per-day shares, keyed by date.
    pub by_day: BTreeMap<NaiveDate, Shares>,
}

impl PeriodTotals {
    /// Returns an employee's total for the period.
    pub fn employee_total(&self, employee_id: &str) -> Option<Decimal> {
        self.by_employee.get(employee_id)
    }

    /// Returns the shares for one day.
    pub fn day(&self, date: NaiveDate) -> Option<&Shares> {
        self.by_day.get(&date)
    }

    /// Sum of every employee's total.
    pub fn grand_total(&self) -> Decimal {
        cents_to_dollars(self.by_employee.total_cents())
    }

    /// Returns `true` if anyone received a positive share on any day.
    pub fn has_any_data(&self) -> bool {
        self.by_employee.iter().any(|s| s.cents > 0)
            || self
                .by_day
                .values()
                .any(|shares| shares.iter().any(|s| s.cents > 0))
    }
}
