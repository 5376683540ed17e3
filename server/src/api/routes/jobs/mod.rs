//! Job API endpoints
//!
//! Jobs are addressed by their natural key: `/{handle}/{title}`.

pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{JobPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::postgres::PostgresService;
use crate::data::postgres::repositories::job;
use crate::data::sql::filter::JobFilters;
use crate::data::sql::value::{SqlType, SqlValue};

use types::{CreateJobRequest, JobDto, UpdateJobRequest};

/// Shared state for Job API endpoints
#[derive(Clone)]
pub struct JobsApiState {
    pub database: Arc<PostgresService>,
}

/// Build Job API routes
pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    let state = JobsApiState { database };

    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route(
            "/{handle}/{title}",
            get(get_job).patch(update_job).delete(delete_job),
        )
        .with_state(state)
}

fn job_not_found(handle: &str, title: &str) -> ApiError {
    ApiError::not_found(
        "JOB_NOT_FOUND",
        format!("Job not found: {} at {}", title, handle),
    )
}

/// List jobs, optionally filtered
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    tag = "jobs",
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive substring match on title"),
        ("minSalary" = Option<i64>, Query, description = "Inclusive lower bound on salary"),
        ("hasEquity" = Option<bool>, Query, description = "true restricts to jobs with non-zero equity")
    ),
    responses(
        (status = 200, description = "Jobs ordered by title", body = [JobDto]),
        (status = 400, description = "Unknown filter or bad value")
    )
)]
pub async fn list_jobs(
    State(state): State<JobsApiState>,
    Query(raw): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<JobDto>>, ApiError> {
    let filters = JobFilters::from_query(&raw).map_err(ApiError::from_query)?;

    let rows = job::list_jobs(state.database.pool(), &filters)
        .await
        .map_err(ApiError::from_postgres)?;

    Ok(Json(rows.into_iter().map(JobDto::from).collect()))
}

/// Create a new job under an existing company
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    tag = "jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobDto),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Company not found"),
        (status = 409, description = "Company already has a job with this title")
    )
)]
pub async fn create_job(
    State(state): State<JobsApiState>,
    ValidatedJson(body): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobDto>), ApiError> {
    let row = job::create_job(
        state.database.pool(),
        &body.title,
        body.salary,
        body.equity,
        &body.company_handle,
    )
    .await
    .map_err(ApiError::from_postgres)?
    .ok_or_else(|| {
        ApiError::not_found(
            "COMPANY_NOT_FOUND",
            format!("Company not found: {}", body.company_handle),
        )
    })?;

    Ok((StatusCode::CREATED, Json(JobDto::from(row))))
}

/// Get a job by company handle and title
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{handle}/{title}",
    tag = "jobs",
    params(
        ("handle" = String, Path, description = "Company handle"),
        ("title" = String, Path, description = "Job title")
    ),
    responses(
        (status = 200, description = "Job details", body = JobDto),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_job(
    State(state): State<JobsApiState>,
    path: JobPath,
) -> Result<Json<JobDto>, ApiError> {
    let row = job::get_job(state.database.pool(), &path.handle, &path.title)
        .await
        .map_err(ApiError::from_postgres)?
        .ok_or_else(|| job_not_found(&path.handle, &path.title))?;

    Ok(Json(JobDto::from(row)))
}

/// Partially update a job
#[utoipa::path(
    patch,
    path = "/api/v1/jobs/{handle}/{title}",
    tag = "jobs",
    params(
        ("handle" = String, Path, description = "Company handle"),
        ("title" = String, Path, description = "Job title")
    ),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Job updated", body = JobDto),
        (status = 400, description = "No fields to update or invalid request"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "New title collides with another job")
    )
)]
pub async fn update_job(
    State(state): State<JobsApiState>,
    path: JobPath,
    ValidatedJson(body): ValidatedJson<UpdateJobRequest>,
) -> Result<Json<JobDto>, ApiError> {
    // Validation already rejected an explicit null title
    let mut fields: Vec<(&str, SqlValue)> = Vec::new();
    if let Some(Some(title)) = body.title {
        fields.push(("title", SqlValue::Text(title)));
    }
    if let Some(salary) = body.salary {
        fields.push((
            "salary",
            match salary {
                Some(amount) => SqlValue::Int(amount),
                None => SqlValue::Null(SqlType::Int),
            },
        ));
    }
    if let Some(equity) = body.equity {
        fields.push((
            "equity",
            match equity {
                Some(stake) => SqlValue::Numeric(stake),
                None => SqlValue::Null(SqlType::Numeric),
            },
        ));
    }

    let row = job::update_job(state.database.pool(), &path.handle, &path.title, fields)
        .await
        .map_err(ApiError::from_postgres)?
        .ok_or_else(|| job_not_found(&path.handle, &path.title))?;

    Ok(Json(JobDto::from(row)))
}

/// Delete a job
#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{handle}/{title}",
    tag = "jobs",
    params(
        ("handle" = String, Path, description = "Company handle"),
        ("title" = String, Path, description = "Job title")
    ),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn delete_job(
    State(state): State<JobsApiState>,
    path: JobPath,
) -> Result<StatusCode, ApiError> {
    let deleted = job::delete_job(state.database.pool(), &path.handle, &path.title)
        .await
        .map_err(ApiError::from_postgres)?;

    if !deleted {
        return Err(job_not_found(&path.handle, &path.title));
    }

    Ok(StatusCode::NO_CONTENT)
}
