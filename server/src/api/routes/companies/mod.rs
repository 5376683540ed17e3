//! Company API endpoints

pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{CompanyPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::postgres::PostgresService;
use crate::data::postgres::repositories::{company, job};
use crate::data::sql::filter::CompanyFilters;
use crate::data::sql::value::{SqlType, SqlValue};

use types::{CompanyDetailDto, CompanyDto, CreateCompanyRequest, UpdateCompanyRequest};

/// Shared state for Company API endpoints
#[derive(Clone)]
pub struct CompaniesApiState {
    pub database: Arc<PostgresService>,
}

/// Build Company API routes
pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    let state = CompaniesApiState { database };

    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/{handle}",
            get(get_company)
                .patch(update_company)
                .delete(delete_company),
        )
        .with_state(state)
}

fn company_not_found(handle: &str) -> ApiError {
    ApiError::not_found(
        "COMPANY_NOT_FOUND",
        format!("Company not found: {}", handle),
    )
}

/// List companies, optionally filtered
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    tag = "companies",
    params(
        ("companyName" = Option<String>, Query, description = "Case-insensitive substring match on name"),
        ("minEmployees" = Option<i64>, Query, description = "Inclusive lower bound on employee count"),
        ("maxEmployees" = Option<i64>, Query, description = "Inclusive upper bound on employee count")
    ),
    responses(
        (status = 200, description = "Companies ordered by name", body = [CompanyDto]),
        (status = 400, description = "Unknown filter, bad value, or inverted range")
    )
)]
pub async fn list_companies(
    State(state): State<CompaniesApiState>,
    Query(raw): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<CompanyDto>>, ApiError> {
    let filters = CompanyFilters::from_query(&raw).map_err(ApiError::from_query)?;

    let rows = company::list_companies(state.database.pool(), &filters)
        .await
        .map_err(ApiError::from_postgres)?;

    Ok(Json(rows.into_iter().map(CompanyDto::from).collect()))
}

/// Create a new company
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    tag = "companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyDto),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Handle already taken")
    )
)]
pub async fn create_company(
    State(state): State<CompaniesApiState>,
    ValidatedJson(body): ValidatedJson<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyDto>), ApiError> {
    let row = company::create_company(
        state.database.pool(),
        &body.handle,
        &body.name,
        body.description.as_deref().unwrap_or(""),
        body.num_employees.unwrap_or(0),
        body.logo_url.as_deref(),
    )
    .await
    .map_err(ApiError::from_postgres)?;

    Ok((StatusCode::CREATED, Json(CompanyDto::from(row))))
}

/// Get a company with its jobs
#[utoipa::path(
    get,
    path = "/api/v1/companies/{handle}",
    tag = "companies",
    params(
        ("handle" = String, Path, description = "Company handle")
    ),
    responses(
        (status = 200, description = "Company details with jobs", body = CompanyDetailDto),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company(
    State(state): State<CompaniesApiState>,
    path: CompanyPath,
) -> Result<Json<CompanyDetailDto>, ApiError> {
    let pool = state.database.pool();

    let row = company::get_company(pool, &path.handle)
        .await
        .map_err(ApiError::from_postgres)?
        .ok_or_else(|| company_not_found(&path.handle))?;

    let jobs = job::list_jobs_for_company(pool, &path.handle)
        .await
        .map_err(ApiError::from_postgres)?;

    Ok(Json(CompanyDetailDto {
        company: CompanyDto::from(row),
        jobs: jobs.into_iter().map(Into::into).collect(),
    }))
}

/// Partially update a company
#[utoipa::path(
    patch,
    path = "/api/v1/companies/{handle}",
    tag = "companies",
    params(
        ("handle" = String, Path, description = "Company handle")
    ),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = CompanyDto),
        (status = 400, description = "No fields to update or invalid request"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn update_company(
    State(state): State<CompaniesApiState>,
    path: CompanyPath,
    ValidatedJson(body): ValidatedJson<UpdateCompanyRequest>,
) -> Result<Json<CompanyDto>, ApiError> {
    // Validation already rejected explicit nulls on the non-nullable fields
    let mut fields: Vec<(&str, SqlValue)> = Vec::new();
    if let Some(Some(name)) = body.name {
        fields.push(("name", SqlValue::Text(name)));
    }
    if let Some(Some(description)) = body.description {
        fields.push(("description", SqlValue::Text(description)));
    }
    if let Some(Some(num_employees)) = body.num_employees {
        fields.push(("numEmployees", SqlValue::Int(num_employees)));
    }
    if let Some(logo_url) = body.logo_url {
        fields.push((
            "logoUrl",
            match logo_url {
                Some(url) => SqlValue::Text(url),
                None => SqlValue::Null(SqlType::Text),
            },
        ));
    }

    let row = company::update_company(state.database.pool(), &path.handle, fields)
        .await
        .map_err(ApiError::from_postgres)?
        .ok_or_else(|| company_not_found(&path.handle))?;

    Ok(Json(CompanyDto::from(row)))
}

/// Delete a company and its jobs
#[utoipa::path(
    delete,
    path = "/api/v1/companies/{handle}",
    tag = "companies",
    params(
        ("handle" = String, Path, description = "Company handle")
    ),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn delete_company(
    State(state): State<CompaniesApiState>,
    path: CompanyPath,
) -> Result<StatusCode, ApiError> {
    let deleted = company::delete_company(state.database.pool(), &path.handle)
        .await
        .map_err(ApiError::from_postgres)?;

    if !deleted {
        return Err(company_not_found(&path.handle));
    }

    Ok(StatusCode::NO_CONTENT)
}
