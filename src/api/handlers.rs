//! HTTP request handlers for the payroll API.
//!
//! This module contains the router and the handler functions for all
//! endpoints. Every handler runs inside a request span carrying a fresh
//! correlation id.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Request, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use serde_json::{Value, json};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    Job, JobUpdate, NewJob, NewPlumber, Payroll, PayrollReport, PayrollSummary, PayrollUpdate,
    Plumber, PlumberReport, PlumberUpdate,
};

use super::request::{
    CommissionRequest, CreateJobRequest, CreatePayrollRequest, CreatePlumberRequest,
};
use super::response::{ApiError, ApiErrorResponse, CommissionPreview};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/plumbers", get(list_plumbers).post(create_plumber))
        .route("/plumbers/active", get(list_active_plumbers))
        .route(
            "/plumbers/:id",
            get(get_plumber).patch(update_plumber).delete(delete_plumber),
        )
        .route("/jobs", get(list_jobs).post(create_job))
        .route(
            "/jobs/:id",
            get(get_job).patch(update_job).delete(delete_job),
        )
        .route("/jobs/plumber/:plumber_id", get(jobs_by_plumber))
        .route("/jobs/payroll/:payroll_id", get(jobs_by_payroll))
        .route("/payrolls", get(list_payrolls).post(create_payroll))
        .route("/payrolls/latest-finalized", get(latest_finalized_payroll))
        .route("/payrolls/:id", get(get_payroll).patch(update_payroll))
        .route("/payrolls/:id/summary", get(payroll_summary))
        .route("/payrolls/:id/report", get(payroll_report))
        .route(
            "/payrolls/:id/plumbers/:plumber_id/report",
            get(plumber_report),
        )
        .route("/calculate-commission", post(calculate_commission))
        .layer(middleware::map_response(no_store));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

/// Wraps each request in a span with a correlation id and logs completion.
async fn trace_request(request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4();
    let span = info_span!(
        "request",
        correlation_id = %correlation_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        let start_time = Instant::now();
        let response = next.run(request).await;
        info!(
            status = response.status().as_u16(),
            duration_us = start_time.elapsed().as_micros(),
            "Request completed"
        );
        response
    }
    .instrument(span)
    .await
}

/// Marks every API response as uncacheable.
async fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// Logs an engine error and converts it to its HTTP form.
fn reject(error: EngineError) -> ApiErrorResponse {
    warn!(error = %error, "Request rejected");
    error.into()
}

/// Unwraps a JSON body, mapping extractor rejections to API errors.
fn read_json<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field name.
            let body_text = err.body_text();
            warn!(error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Parses a path segment as a record id.
fn parse_id(raw: &str) -> ApiResult<u64> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            warn!(raw_id = %raw, "Invalid id in path");
            Err(ApiErrorResponse::bad_request(ApiError::invalid_id(raw)))
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// --- Plumbers ---

async fn list_plumbers(State(state): State<AppState>) -> ApiResult<Json<Vec<Plumber>>> {
    let plumbers = state.service().list_plumbers().await.map_err(reject)?;
    Ok(Json(plumbers))
}

async fn list_active_plumbers(State(state): State<AppState>) -> ApiResult<Json<Vec<Plumber>>> {
    let plumbers = state.service().list_active_plumbers().await.map_err(reject)?;
    Ok(Json(plumbers))
}

async fn get_plumber(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Plumber>> {
    let id = parse_id(&id)?;
    let plumber = state.service().get_plumber(id).await.map_err(reject)?;
    Ok(Json(plumber))
}

async fn create_plumber(
    State(state): State<AppState>,
    payload: Result<Json<CreatePlumberRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Plumber>)> {
    let plumber: NewPlumber = read_json(payload)?.into();
    plumber.validate().map_err(reject)?;
    let plumber = state
        .service()
        .create_plumber(plumber)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(plumber)))
}

async fn update_plumber(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PlumberUpdate>, JsonRejection>,
) -> ApiResult<Json<Plumber>> {
    let id = parse_id(&id)?;
    let update = read_json(payload)?;
    update.validate().map_err(reject)?;
    let plumber = state
        .service()
        .update_plumber(id, update)
        .await
        .map_err(reject)?;
    Ok(Json(plumber))
}

async fn delete_plumber(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.service().delete_plumber(id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Jobs ---

async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.service().list_jobs().await.map_err(reject)?;
    Ok(Json(jobs))
}

async fn get_job(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Job>> {
    let id = parse_id(&id)?;
    let job = state.service().get_job(id).await.map_err(reject)?;
    Ok(Json(job))
}

async fn jobs_by_plumber(
    State(state): State<AppState>,
    Path(plumber_id): Path<String>,
) -> ApiResult<Json<Vec<Job>>> {
    let plumber_id = parse_id(&plumber_id)?;
    let jobs = state
        .service()
        .jobs_by_plumber(plumber_id)
        .await
        .map_err(reject)?;
    Ok(Json(jobs))
}

async fn jobs_by_payroll(
    State(state): State<AppState>,
    Path(payroll_id): Path<String>,
) -> ApiResult<Json<Vec<Job>>> {
    let payroll_id = parse_id(&payroll_id)?;
    let jobs = state
        .service()
        .jobs_by_payroll(payroll_id)
        .await
        .map_err(reject)?;
    Ok(Json(jobs))
}

async fn create_job(
    State(state): State<AppState>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    let job: NewJob = read_json(payload)?.into();
    job.validate().map_err(reject)?;
    let job = state.service().create_job(job).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(job)))
}

async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<JobUpdate>, JsonRejection>,
) -> ApiResult<Json<Job>> {
    let id = parse_id(&id)?;
    let update = read_json(payload)?;
    update.validate().map_err(reject)?;
    let job = state.service().update_job(id, update).await.map_err(reject)?;
    Ok(Json(job))
}

async fn delete_job(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.service().delete_job(id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Payrolls ---

async fn list_payrolls(State(state): State<AppState>) -> ApiResult<Json<Vec<Payroll>>> {
    let payrolls = state.service().list_payrolls().await.map_err(reject)?;
    Ok(Json(payrolls))
}

async fn latest_finalized_payroll(State(state): State<AppState>) -> ApiResult<Json<Payroll>> {
    match state
        .service()
        .latest_finalized_payroll()
        .await
        .map_err(reject)?
    {
        Some(payroll) => Ok(Json(payroll)),
        None => Err(ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::new("PAYROLL_NOT_FOUND", "No finalized payroll found"),
        }),
    }
}

async fn get_payroll(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Payroll>> {
    let id = parse_id(&id)?;
    let payroll = state.service().get_payroll(id).await.map_err(reject)?;
    Ok(Json(payroll))
}

async fn create_payroll(
    State(state): State<AppState>,
    payload: Result<Json<CreatePayrollRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Payroll>)> {
    let payroll = read_json(payload)?.into();
    let payroll = state
        .service()
        .create_payroll(payroll)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(payroll)))
}

async fn update_payroll(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PayrollUpdate>, JsonRejection>,
) -> ApiResult<Json<Payroll>> {
    let id = parse_id(&id)?;
    let update = read_json(payload)?;
    let payroll = state
        .service()
        .update_payroll(id, update)
        .await
        .map_err(reject)?;
    Ok(Json(payroll))
}

async fn payroll_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<PayrollSummary>>> {
    let id = parse_id(&id)?;
    let rows = state.service().payroll_summary(id).await.map_err(reject)?;
    info!(payroll_id = id, plumbers = rows.len(), "Payroll summary built");
    Ok(Json(rows))
}

async fn payroll_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PayrollReport>> {
    let id = parse_id(&id)?;
    let report = state.service().payroll_report(id).await.map_err(reject)?;
    info!(
        payroll_id = id,
        job_count = report.totals.job_count,
        total_commission = %report.totals.total_commission,
        "Payroll report built"
    );
    Ok(Json(report))
}

async fn plumber_report(
    State(state): State<AppState>,
    Path((id, plumber_id)): Path<(String, String)>,
) -> ApiResult<Json<PlumberReport>> {
    let id = parse_id(&id)?;
    let plumber_id = parse_id(&plumber_id)?;
    let report = state
        .service()
        .plumber_report(id, plumber_id)
        .await
        .map_err(reject)?;
    Ok(Json(report))
}

// --- Calculator ---

async fn calculate_commission(
    State(state): State<AppState>,
    payload: Result<Json<CommissionRequest>, JsonRejection>,
) -> ApiResult<Json<CommissionPreview>> {
    let request = read_json(payload)?;
    request.validate().map_err(reject)?;

    let service = state.service();
    let breakdown = service.preview_commission(
        request.revenue,
        request.parts_cost,
        request.outside_labor,
        request.commission_rate,
    )
    .map_err(reject)?;
    Ok(Json(CommissionPreview::new(breakdown, service.policy())))
}
