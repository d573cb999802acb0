//! Request types for the Tip Pool Engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DayRecord, HoursSheet, TipRecord};

/// Request body for the `/allocate` endpoint: a single day to split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// The date being split, echoed back in the response.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Tips collected that day, keyed by source.
    pub tips: TipRecord,
    /// Hours worked that day, keyed by employee id in roster order.
    pub hours: HoursSheet,
}

/// Request body for the `/aggregate` endpoint: every day of a pay period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationRequest {
    /// The days to aggregate, in order.
    pub days: Vec<DayRecord>,
}

/// Request body for the `/periods` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The first day of the period.
    pub start_date: NaiveDate,
    /// The last day of the period; defaults to the configured length.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}
