//! HTTP request handlers for the Tip Pool Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{aggregate, allocate};

use super::request::{AggregationRequest, AllocationRequest, PeriodRequest};
use super::response::{
    AggregationResponse, AllocationResponse, ApiError, ApiErrorResponse, ENGINE_VERSION,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/allocate", post(allocate_handler))
        .route("/aggregate", post(aggregate_handler))
        .route("/periods", post(period_handler))
        .with_state(state)
}

/// Handler for POST /allocate.
///
/// Splits one day's tips between the employees on its hours sheet.
async fn allocate_handler(
    payload: Result<Json<AllocationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allocation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let allocation = allocate(&request.tips, &request.hours);

    if !allocation.reconciled {
        warn!(
            correlation_id = %correlation_id,
            total_tips = %allocation.total_tips,
            allocated = %allocation.shares.total(),
            "Allocation did not reconcile"
        );
    }

    info!(
        correlation_id = %correlation_id,
        employees = allocation.shares.len(),
        total_tips = %allocation.total_tips,
        total_hours = %allocation.total_hours,
        duration_us = start_time.elapsed().as_micros(),
        "Allocation completed successfully"
    );

    json_response(
        StatusCode::OK,
        AllocationResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            date: request.date,
            allocation,
        },
    )
}

/// Handler for POST /aggregate.
///
/// Totals a whole pay period from its day records.
async fn aggregate_handler(
    payload: Result<Json<AggregationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing aggregation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let totals = aggregate(&request.days);
    let grand_total = totals.grand_total();

    info!(
        correlation_id = %correlation_id,
        days = request.days.len(),
        employees = totals.by_employee.len(),
        grand_total = %grand_total,
        duration_us = start_time.elapsed().as_micros(),
        "Aggregation completed successfully"
    );

    json_response(
        StatusCode::OK,
        AggregationResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            day_count: request.days.len(),
            grand_total,
            totals,
        },
    )
}

/// Handler for POST /periods.
///
/// Returns an empty pay period template using the configured tip sources.
async fn period_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing pay period request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.config().build_period(request.start_date, request.end_date) {
        Ok(period) => {
            info!(
                correlation_id = %correlation_id,
                start_date = %period.start_date,
                end_date = %period.end_date,
                days = period.days.len(),
                "Pay period created"
            );
            json_response(StatusCode::OK, period)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Pay period rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}
