//! Calculation logic for the Tip Pool Engine.
//!
//! This module contains the daily allocation (an hours-proportional split
//! using the largest-remainder method), the pay period aggregation built on
//! top of it, and the numeric coercion both share.

mod aggregation;
mod allocation;
mod coercion;

pub use aggregation::aggregate;
pub use allocation::{
    Allocation, RECONCILIATION_TOLERANCE, allocate, pooled_tips, pooled_tips_cents,
};
pub use coercion::{
    cents_to_dollars, checked_round_to_cents, coerce_amount, coerce_hours, non_negative,
    parse_leading_decimal, round_dollars, round_to_cents,
};
