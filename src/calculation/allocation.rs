//! Daily tip allocation.
//!
//! This module splits one day's pooled tips between employees in proportion
//! to the hours they worked, using the largest-remainder method so the
//! allocated cents always add up to the pooled total.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::coercion::{
    cents_to_dollars, checked_round_to_cents, non_negative, round_dollars, round_to_cents,
};
use crate::models::{HoursSheet, Shares, TipRecord};

/// Largest gap between allocated and pooled dollars that still counts as
/// reconciled.
pub const RECONCILIATION_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// The result of allocating one day's tips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Each working employee's share. In the degenerate case (no tips or no
    /// hours) every employee on the hours sheet appears with zero.
    pub shares: Shares,
    /// Pooled tips, rounded to the cent.
    pub total_tips: Decimal,
    /// Pooled tips in cents.
    pub total_tips_cents: i64,
    /// Total positive hours worked. Zero in the degenerate case.
    pub total_hours: Decimal,
    /// Pooled tips divided by total hours, unrounded.
    pub rate_per_hour: Decimal,
    /// Whether the shares add up to the pooled tips.
    pub reconciled: bool,
    /// Employees who received a remainder cent, in the order it was handed out.
    pub penny_recipients: Vec<String>,
}

/// A working employee's exact share, split into whole cents and a remainder.
struct ExactShare<'a> {
    employee_id: &'a str,
    index: usize,
    floor_cents: i64,
    remainder: Decimal,
}

/// Sums every tip source, treating negative amounts as zero, and rounds the
/// pool to the nearest cent.
///
/// A sum beyond the range of `Decimal` saturates at `Decimal::MAX`.
pub fn pooled_tips(tips: &TipRecord) -> Decimal {
    let total = tips.iter().fold(Decimal::ZERO, |sum, source| {
        sum.checked_add(non_negative(source.amount))
            .unwrap_or(Decimal::MAX)
    });
    round_dollars(total)
}

/// The pooled tips in cents, saturating at `i64::MAX`.
pub fn pooled_tips_cents(tips: &TipRecord) -> i64 {
    round_to_cents(pooled_tips(tips))
}

/// Allocates one day's pooled tips by hours worked.
///
/// Employees with blank, zero or negative hours are left out of the split.
/// Each remaining employee gets the floor of their exact cent share; the
/// cents left over go one each to the largest fractional remainders, with
/// ties going to whoever appears first on the hours sheet.
///
/// If the pool or the total hours is zero, every employee on the sheet
/// (including those without hours) gets zero.
///
/// This never fails. Pools larger than `i64::MAX` cents are paid out up to
/// that amount and reported as not reconciled; hours whose total overflows
/// leave the pool unallocated, also not reconciled.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::allocate;
/// use tip_engine::models::{HoursSheet, TipRecord};
/// use rust_decimal::Decimal;
///
/// let tips = TipRecord::new().with("cash", Decimal::new(10, 0));
/// let hours = HoursSheet::new()
///     .with("a", Decimal::ONE)
///     .with("b", Decimal::ONE)
///     .with("c", Decimal::ONE);
///
/// let allocation = allocate(&tips, &hours);
/// assert_eq!(allocation.shares.get("a"), Some(Decimal::new(334, 2)));
/// assert_eq!(allocation.shares.get("b"), Some(Decimal::new(333, 2)));
/// assert_eq!(allocation.shares.total(), Decimal::new(1000, 2));
/// assert!(allocation.reconciled);
/// ```
pub fn allocate(tips: &TipRecord, hours: &HoursSheet) -> Allocation {
    let pooled = pooled_tips(tips);
    let (total_cents, total_tips) = match checked_round_to_cents(pooled) {
        Some(cents) => (cents, cents_to_dollars(cents)),
        None => {
            warn!(
                pooled = %pooled,
                "Pooled tips exceed the largest payable amount, clamping"
            );
            (i64::MAX, pooled)
        }
    };

    let worked: Vec<(&str, Decimal)> = hours
        .iter()
        .filter_map(|e| e.positive_hours().map(|h| (e.employee_id.as_str(), h)))
        .collect();

    let Some(total_hours) = worked
        .iter()
        .try_fold(Decimal::ZERO, |sum, (_, h)| sum.checked_add(*h))
    else {
        warn!(
            employees = worked.len(),
            "Total hours overflowed, leaving the pool unallocated"
        );
        return unallocated(hours, total_tips, total_cents, total_cents == 0);
    };

    if total_hours == Decimal::ZERO || total_cents == 0 {
        debug!(
            employees = hours.len(),
            total_tips = %total_tips,
            "Nothing to split, every employee gets zero"
        );
        return unallocated(hours, total_tips, total_cents, true);
    }

    let rate_per_hour = total_tips
        .checked_div(total_hours)
        .unwrap_or(Decimal::MAX);

    let mut exact = exact_shares(&worked, total_hours, total_cents);
    let mut cents: Vec<i64> = exact.iter().map(|s| s.floor_cents).collect();
    let assigned = cents.iter().fold(0i64, |sum, c| sum.saturating_add(*c));
    let to_assign = pennies_to_assign(total_cents, assigned, exact.len());

    exact.sort_by(|a, b| match b.remainder.cmp(&a.remainder) {
        Ordering::Equal => a.index.cmp(&b.index),
        other => other,
    });

    let mut penny_recipients = Vec::with_capacity(to_assign);
    for share in exact.iter().take(to_assign) {
        cents[share.index] = cents[share.index].saturating_add(1);
        penny_recipients.push(share.employee_id.to_string());
    }

    let mut shares = Shares::new();
    for ((employee_id, _), share_cents) in worked.iter().zip(&cents) {
        shares.insert(*employee_id, *share_cents);
    }

    let reconciled = (shares.total() - total_tips).abs() < RECONCILIATION_TOLERANCE;

    debug!(
        employees = worked.len(),
        total_tips = %total_tips,
        total_hours = %total_hours,
        pennies = to_assign,
        reconciled,
        "Allocated daily tips"
    );

    Allocation {
        shares,
        total_tips,
        total_tips_cents: total_cents,
        total_hours,
        rate_per_hour,
        reconciled,
        penny_recipients,
    }
}

/// Lists every employee on the sheet with zero.
fn unallocated(
    hours: &HoursSheet,
    total_tips: Decimal,
    total_cents: i64,
    reconciled: bool,
) -> Allocation {
    let mut shares = Shares::new();
    for employee_id in hours.employee_ids() {
        shares.insert(employee_id, 0);
    }
    Allocation {
        shares,
        total_tips,
        total_tips_cents: total_cents,
        total_hours: Decimal::ZERO,
        rate_per_hour: Decimal::ZERO,
        reconciled,
        penny_recipients: Vec::new(),
    }
}

/// Number of leftover cents to hand out, at most one per worker.
fn pennies_to_assign(total_cents: i64, assigned: i64, workers: usize) -> usize {
    usize::try_from(total_cents.saturating_sub(assigned))
        .unwrap_or(0)
        .min(workers)
}

/// Splits each employee's exact cent share into whole cents and a remainder.
///
/// `hours * total_cents` is split with an exact modulo by `total_hours`, so
/// all remainders share one denominator and compare exactly. Inputs so large
/// that the product overflows fall back to dividing first.
fn exact_shares<'a>(
    worked: &[(&'a str, Decimal)],
    total_hours: Decimal,
    total_cents: i64,
) -> Vec<ExactShare<'a>> {
    let pool = Decimal::from(total_cents);
    shares_by_modulo(worked, total_hours, pool)
        .unwrap_or_else(|| shares_by_ratio(worked, total_hours, pool))
}

fn shares_by_modulo<'a>(
    worked: &[(&'a str, Decimal)],
    total_hours: Decimal,
    pool: Decimal,
) -> Option<Vec<ExactShare<'a>>> {
    worked
        .iter()
        .enumerate()
        .map(|(index, &(employee_id, h))| {
            let numerator = h.checked_mul(pool)?;
            let remainder = numerator.checked_rem(total_hours)?;
            let whole = (numerator - remainder).checked_div(total_hours)?.round();
            Some(ExactShare {
                employee_id,
                index,
                floor_cents: decimal_to_cents(whole),
                remainder,
            })
        })
        .collect()
}

fn shares_by_ratio<'a>(
    worked: &[(&'a str, Decimal)],
    total_hours: Decimal,
    pool: Decimal,
) -> Vec<ExactShare<'a>> {
    worked
        .iter()
        .enumerate()
        .map(|(index, &(employee_id, h))| {
            // h <= total_hours, so neither step can leave the range
            let exact = h
                .checked_div(total_hours)
                .and_then(|ratio| ratio.checked_mul(pool))
                .unwrap_or(Decimal::ZERO);
            let whole = exact.floor();
            ExactShare {
                employee_id,
                index,
                floor_cents: decimal_to_cents(whole),
                remainder: exact - whole,
            }
        })
        .collect()
}

/// Converts a whole-valued decimal cent count to `i64`.
fn decimal_to_cents(whole: Decimal) -> i64 {
    whole.trunc().to_i64().unwrap_or(0)
}
