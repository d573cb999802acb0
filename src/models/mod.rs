//! Core data models for the Tip Pool Engine.
//!
//! This module contains the day inputs (tips and hours), the computed shares
//! and the pay period types used throughout the engine.

mod day;
mod hours;
mod pay_period;
mod period_totals;
mod share;
mod tips;

pub use day::DayRecord;
pub use hours::{HoursSheet, HoursWorked};
pub use pay_period::PayPeriod;
pub use period_totals::PeriodTotals;
pub use share::{EmployeeShare, Shares};
pub use tips::{TipRecord, TipSource};
