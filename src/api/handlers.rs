//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{aggregate, compute_deductions};
use crate::error::EngineError;
use crate::export::export_to_bytes;
use crate::models::PayrollMonth;

use super::request::{DeductionRequest, PayrollRequest, RecordRequest, RecordsQuery};
use super::response::{ApiError, ApiErrorResponse, DeductionResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/deductions", post(deductions_handler))
        .route("/records", get(list_records_handler))
        .route("/records/export", get(export_records_handler))
        .route(
            "/records/:date",
            get(get_record_handler)
                .put(put_record_handler)
                .delete(delete_record_handler),
        )
        .route("/payroll", post(payroll_handler))
        .with_state(state)
}

/// Maps a JSON extraction failure to a 400 response.
fn json_body<T: DeserializeOwned>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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

    Err(ApiErrorResponse::bad_request(error))
}

/// Maps a query string extraction failure to a 400 response.
fn query_params<T>(
    query: Result<Query<T>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    query.map(|Query(params)| params).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(
            correlation_id = %correlation_id,
            error = %body_text,
            "Query string error"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

/// Logs a failed request and converts the error into its HTTP response.
fn failure(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    err.into()
}

fn parse_date(text: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| EngineError::InvalidDate {
        value: text.to_string(),
    })
}

/// Handler for POST /deductions.
async fn deductions_handler(
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing deduction request");

    let request = json_body(payload, correlation_id)?;
    request
        .validate()
        .map_err(|err| failure(correlation_id, err))?;

    let result = compute_deductions(
        request.salary,
        request.non_taxable_amount,
        request.dependent_count,
    );
    info!(
        correlation_id = %correlation_id,
        total_deduction = %result.total_deduction,
        net_pay = %result.net_pay,
        "Deductions computed"
    );

    Ok(Json(DeductionResponse::from(result)).into_response())
}

/// Handler for GET /records.
///
/// With both `year` and `month` in the query string, only that month is
/// listed.
async fn list_records_handler(
    State(state): State<AppState>,
    query: Result<Query<RecordsQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(query, correlation_id)?;

    let records = match (query.year, query.month) {
        (Some(year), Some(month)) => {
            let period =
                PayrollMonth::new(year, month).map_err(|err| failure(correlation_id, err))?;
            state.with_store(|store| store.load_month(&period))
        }
        (None, None) => state.with_store(|store| store.load_all()),
        _ => {
            return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                "year and month must be given together",
            )));
        }
    }
    .map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        count = records.len(),
        "Listed work records"
    );
    Ok(Json(records).into_response())
}

/// Handler for GET /records/:date.
async fn get_record_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let date = parse_date(&date).map_err(|err| failure(correlation_id, err))?;

    let record = state
        .with_store(|store| store.get(date))
        .map_err(|err| failure(correlation_id, err))?
        .ok_or_else(|| {
            failure(
                correlation_id,
                EngineError::RecordNotFound {
                    date: date.to_string(),
                },
            )
        })?;

    Ok(Json(record).into_response())
}

/// Handler for PUT /records/:date.
///
/// Saves the record for the date, replacing any existing one.
async fn put_record_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, date = %date, "Saving work record");

    let date = parse_date(&date).map_err(|err| failure(correlation_id, err))?;
    let record = json_body(payload, correlation_id)?.into_record(date);

    state
        .with_store(|store| store.upsert(record.clone()))
        .map_err(|err| failure(correlation_id, err))?;

    Ok(Json(record).into_response())
}

/// Handler for DELETE /records/:date.
async fn delete_record_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, date = %date, "Deleting work record");

    let date = parse_date(&date).map_err(|err| failure(correlation_id, err))?;
    let removed = state
        .with_store(|store| store.delete(date))
        .map_err(|err| failure(correlation_id, err))?;

    if removed {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(failure(
            correlation_id,
            EngineError::RecordNotFound {
                date: date.to_string(),
            },
        ))
    }
}

/// Handler for GET /records/export.
async fn export_records_handler(
    State(state): State<AppState>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();

    let bytes = state
        .with_store(|store| store.load_all())
        .and_then(|records| export_to_bytes(&records))
        .map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        bytes = bytes.len(),
        "Exported work records"
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"work_records.csv\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Handler for POST /payroll.
///
/// Aggregates the stored records of the requested month and returns the
/// report with pay truncated to whole won.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = json_body(payload, correlation_id)?;
    let period =
        PayrollMonth::new(request.year, request.month).map_err(|err| failure(correlation_id, err))?;
    let config = request.configuration(state.config().payroll());

    let start_time = Instant::now();
    let report = state
        .with_store(|store| store.load_month(&period))
        .and_then(|records| aggregate(period, &records, &config, state.config().calendar()))
        .map_err(|err| failure(correlation_id, err))?
        .into_presentation();

    info!(
        correlation_id = %correlation_id,
        period = %period,
        calculation_id = %report.calculation_id,
        net_pay = %report.result.net_pay,
        warnings = report.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payroll computed"
    );
    Ok(Json(report).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::store::InMemoryRecordStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/kr").expect("Failed to load config");
        AppState::new(config, InMemoryRecordStore::new())
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_deductions_with_defaults() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("POST", "/deductions", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["taxable_income"], "2800000");
        assert_eq!(json["net_pay"], "2644286");
        assert_eq!(json["details"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_deductions_reject_zero_dependents() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("POST", "/deductions", r#"{"dependent_count": 0}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_put_record_normalizes_and_returns_it() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "PUT",
                "/records/2025-01-02",
                r#"{"start_time": "0900", "end_time": "1800"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["date"], "2025-01-02");
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["day_type"], "ordinary");
        assert_eq!(json["spans_midnight"], false);
    }

    #[tokio::test]
    async fn test_bad_date_in_path_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/records/2025-02-30")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_DATE");
    }

    #[tokio::test]
    async fn test_delete_missing_record_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/records/2025-01-02")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_payroll_rejects_month_13() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("POST", "/payroll", r#"{"year": 2025, "month": 13}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_payroll_missing_month_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("POST", "/payroll", r#"{"year": 2025}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_records_query_needs_both_fields() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/records?year=2025")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_records_query_with_bad_year_is_json_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/records?year=abc&month=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}
