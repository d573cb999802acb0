//! HTTP API module for the Tip Pool Engine.
//!
//! This module exposes the daily allocation, the pay period aggregation and
//! pay period templates as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AggregationRequest, AllocationRequest, PeriodRequest};
pub use response::{AggregationResponse, AllocationResponse, ApiError, ENGINE_VERSION};
pub use state::AppState;
