//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::generation::GenerationRequest;
use crate::models::PayrollFilter;

use super::request::StatusUpdateRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/generate", post(generate_handler))
        .route("/payroll", get(list_handler))
        .route("/payroll/:id", get(get_handler).delete(delete_handler))
        .route("/payroll/:id/status", put(update_status_handler))
        .with_state(state)
}

/// Converts a JSON body rejection into an error response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
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
    ApiErrorResponse::bad_request(error)
}

fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection.body_text(),
        "Invalid payroll id"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(format!(
        "Invalid payroll id: {}",
        rejection.body_text()
    )))
}

/// Handler for POST /payroll/generate.
///
/// Generates payroll for a period and returns the generation report.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll generation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    match state.generator().generate(&request).await {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                month = report.month,
                year = report.year,
                created_count = report.created_count,
                "Payroll generation request completed"
            );
            (
                StatusCode::CREATED,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                month = request.month,
                year = request.year,
                error = %err,
                "Payroll generation rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /payroll.
async fn list_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollFilter>, QueryRejection>,
) -> Response {
    let filter = match query {
        Ok(Query(filter)) => filter,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    match state.admin().list(&filter).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /payroll/{id}.
async fn get_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection).into_response(),
    };

    match state.admin().get(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for PUT /payroll/{id}/status.
async fn update_status_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection).into_response(),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    match state.admin().update_status(id, request.status).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                payroll_id = %id,
                error = %err,
                "Status update rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for DELETE /payroll/{id}.
async fn delete_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection).into_response(),
    };

    match state.admin().delete(id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                payroll_id = %id,
                error = %err,
                "Delete rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
