//! Pay period aggregation.
//!
//! Runs the daily allocation over every day of a pay period and sums the
//! results per employee in integer cents, so no rounding drift builds up
//! however many days are in the period.

use std::collections::BTreeMap;

use tracing::debug;

use super::allocation::allocate;
use crate::models::{DayRecord, PeriodTotals, Shares};

/// Aggregates daily allocations into pay period totals.
///
/// Days are processed in the order given. Each employee's total is the exact
/// cent sum of their daily shares, and employees whose total comes to zero
/// are left out of `by_employee`. If the same date appears twice, both days
/// count toward `by_employee` but `by_day` keeps the later one.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::aggregate;
/// use tip_engine::models::DayRecord;
/// use rust_decimal::Decimal;
///
/// let days: Vec<DayRecord> = serde_json::from_str(r#"[
///     {"date": "2025-01-01", "tips": {"cash": 100}, "hours": {"a": 8, "b": 8}},
///     {"date": "2025-01-02", "tips": {"cash": 80}, "hours": {"a": 6, "b": 2}}
/// ]"#).unwrap();
///
/// let totals = aggregate(&days);
/// assert_eq!(totals.employee_total("a"), Some(Decimal::new(11000, 2)));
/// assert_eq!(totals.employee_total("b"), Some(Decimal::new(7000, 2)));
/// ```
pub fn aggregate(days: &[DayRecord]) -> PeriodTotals {
    let mut by_employee = Shares::new();
    let mut by_day: BTreeMap<_, Shares> = BTreeMap::new();

    for day in days {
        let allocation = allocate(&day.tips, &day.hours);

        for share in allocation.shares.iter() {
            by_employee.add(share.employee_id, share.cents);
        }

        if by_day.insert(day.date, allocation.shares).is_some() {
            debug!(date = %day.date, "Repeated date, keeping the later day's shares");
        }
    }

    by_employee.retain_nonzero();

    debug!(
        days = days.len(),
        employees = by_employee.len(),
        total = %by_employee.total(),
        "Aggregated pay period"
    );

    PeriodTotals {
        by_employee,
        by_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HoursSheet, TipRecord};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_day(date: &str, cash: &str, hours: &[(&str, &str)]) -> DayRecord {
        DayRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            tips: TipRecord::new()
                .with("cash", dec(cash))
                .with("app", Decimal::ZERO)
                .with("creditCard", Decimal::ZERO),
            hours: hours.iter().map(|(id, h)| (*id, Some(dec(h)))).collect(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// AG-001: sums daily shares into period totals
    #[test]
    fn test_sums_daily_shares_into_period_totals() {
        let days = vec![
            make_day("2025-01-01", "100", &[("a", "8"), ("b", "8")]),
            make_day("2025-01-02", "80", &[("a", "6"), ("b", "2")]),
        ];
        let totals = aggregate(&days);

        assert_eq!(totals.employee_total("a"), Some(dec("110")));
        assert_eq!(totals.employee_total("b"), Some(dec("70")));

        let day_one = totals.day(date("2025-01-01")).unwrap();
        assert_eq!(day_one.get("a"), Some(dec("50")));
        assert_eq!(day_one.get("b"), Some(dec("50")));

        let day_two = totals.day(date("2025-01-02")).unwrap();
        assert_eq!(day_two.get("a"), Some(dec("60")));
        assert_eq!(day_two.get("b"), Some(dec("20")));
    }

    #[test]
    fn test_no_drift_over_many_days() {
        // 10.00 over three equal workers every day: a gets 3.34, b and c 3.33
        let days: Vec<DayRecord> = (1..=30)
            .map(|d| {
                make_day(
                    &format!("2025-01-{:02}", d),
                    "10",
                    &[("a", "1"), ("b", "1"), ("c", "1")],
                )
            })
            .collect();
        let totals = aggregate(&days);

        assert_eq!(totals.by_employee.cents("a"), Some(334 * 30));
        assert_eq!(totals.employee_total("a"), Some(dec("100.20")));
        assert_eq!(totals.employee_total("b"), Some(dec("99.90")));
        assert_eq!(totals.employee_total("c"), Some(dec("99.90")));
        assert_eq!(totals.grand_total(), dec("300.00"));
    }

    #[test]
    fn test_zero_total_employees_are_omitted() {
        let days = vec![
            make_day("2025-01-01", "0", &[("a", "8"), ("b", "4")]),
            make_day("2025-01-02", "50", &[("a", "5"), ("b", "0")]),
        ];
        let totals = aggregate(&days);

        assert_eq!(totals.employee_total("a"), Some(dec("50")));
        assert!(!totals.by_employee.contains("b"));

        // the degenerate day still lists everyone with zero
        let day_one = totals.day(date("2025-01-01")).unwrap();
        assert_eq!(day_one.get("b"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_empty_period() {
        let totals = aggregate(&[]);
        assert!(totals.by_employee.is_empty());
        assert!(totals.by_day.is_empty());
        assert!(!totals.has_any_data());
    }

    #[test]
    fn test_is_idempotent() {
        let days = vec![
            make_day("2025-01-01", "97.13", &[("a", "3.5"), ("b", "7"), ("c", "1.25")]),
            make_day("2025-01-02", "12.01", &[("c", "2"), ("a", "9")]),
        ];

        assert_eq!(aggregate(&days), aggregate(&days));
    }

    #[test]
    fn test_employee_totals_do_not_depend_on_day_order() {
        let forward = vec![
            make_day("2025-01-01", "97.13", &[("a", "3.5"), ("b", "7"), ("c", "1.25")]),
            make_day("2025-01-02", "12.01", &[("c", "2"), ("a", "9")]),
            make_day("2025-01-03", "45.67", &[("b", "4"), ("c", "4")]),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        let forward_totals = aggregate(&forward);
        let backward_totals = aggregate(&backward);

        for id in ["a", "b", "c"] {
            assert_eq!(
                forward_totals.by_employee.cents(id),
                backward_totals.by_employee.cents(id)
            );
        }
        assert_eq!(forward_totals.by_day, backward_totals.by_day);
    }

    #[test]
    fn test_repeated_date_counts_both_days_but_keeps_last_split() {
        let days = vec![
            make_day("2025-01-01", "10", &[("a", "1")]),
            make_day("2025-01-01", "20", &[("b", "1")]),
        ];
        let totals = aggregate(&days);

        assert_eq!(totals.employee_total("a"), Some(dec("10")));
        assert_eq!(totals.employee_total("b"), Some(dec("20")));
        assert_eq!(totals.by_day.len(), 1);

        let kept = totals.day(date("2025-01-01")).unwrap();
        assert!(kept.contains("b"));
        assert!(!kept.contains("a"));
    }

    #[test]
    fn test_period_totals_saturate_instead_of_overflowing() {
        let days = vec![
            make_day("2025-01-01", "100000000000000000000", &[("a", "1")]),
            make_day("2025-01-02", "100000000000000000000", &[("a", "1")]),
        ];
        let totals = aggregate(&days);

        assert_eq!(totals.by_employee.cents("a"), Some(i64::MAX));
        assert_eq!(totals.by_employee.total_cents(), i64::MAX);
        assert_eq!(totals.by_day.len(), 2);
    }

    #[test]
    fn test_blank_hours_day_contributes_nothing() {
        let day = DayRecord {
            date: date("2025-01-05"),
            tips: TipRecord::new().with("cash", dec("40")),
            hours: HoursSheet::new().with_blank("a").with_blank("b"),
        };
        let totals = aggregate(&[day]);

        assert!(totals.by_employee.is_empty());
        assert_eq!(totals.day(date("2025-01-05")).unwrap().len(), 2);
    }
}
