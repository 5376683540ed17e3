//! Company repository
//!
//! Companies are keyed by their handle, which is immutable after creation.

use sqlx::PgPool;

use super::map_key_conflict;
use crate::data::postgres::PostgresError;
use crate::data::sql::filter::CompanyFilters;
use crate::data::sql::update::{COMPANY_UPDATE_COLUMNS, PartialUpdate};
use crate::data::sql::value::{self, SqlValue};
use crate::data::types::CompanyRow;

type CompanyTuple = (String, String, String, i64, Option<String>, i64, i64);

const COMPANY_COLUMNS: &str =
    "handle, name, description, num_employees, logo_url, created_at, updated_at";

fn to_row(
    (handle, name, description, num_employees, logo_url, created_at, updated_at): CompanyTuple,
) -> CompanyRow {
    CompanyRow {
        handle,
        name,
        description,
        num_employees,
        logo_url,
        created_at,
        updated_at,
    }
}

/// Create a company, failing with a conflict if the handle is taken
pub async fn create_company(
    pool: &PgPool,
    handle: &str,
    name: &str,
    description: &str,
    num_employees: i64,
    logo_url: Option<&str>,
) -> Result<CompanyRow, PostgresError> {
    let existing: Option<i32> = sqlx::query_scalar("SELECT 1 FROM companies WHERE handle = $1")
        .bind(handle)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(PostgresError::Conflict(format!(
            "Company already exists: {}",
            handle
        )));
    }

    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO companies (handle, name, description, num_employees, logo_url, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(handle)
    .bind(name)
    .bind(description)
    .bind(num_employees)
    .bind(logo_url)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| map_key_conflict(e, format!("Company already exists: {}", handle)))?;

    Ok(CompanyRow {
        handle: handle.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        num_employees,
        logo_url: logo_url.map(str::to_string),
        created_at: now,
        updated_at: now,
    })
}

/// List companies matching the supplied filters, ordered by name
pub async fn list_companies(
    pool: &PgPool,
    filters: &CompanyFilters,
) -> Result<Vec<CompanyRow>, PostgresError> {
    let clause = filters.where_clause(1);
    let sql = format!(
        "SELECT {} FROM companies{} ORDER BY name ASC",
        COMPANY_COLUMNS, clause.sql
    );

    let query = sqlx::query_as::<_, CompanyTuple>(&sql);
    let rows = value::bind_all_query_as(query, &clause.params)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(to_row).collect())
}

/// Get a company by handle
pub async fn get_company(pool: &PgPool, handle: &str) -> Result<Option<CompanyRow>, PostgresError> {
    let sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_COLUMNS);
    let row = sqlx::query_as::<_, CompanyTuple>(&sql)
        .bind(handle)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(to_row))
}

/// Apply a partial update to a company. Returns the updated company, or
/// `None` if the handle does not exist.
pub async fn update_company(
    pool: &PgPool,
    handle: &str,
    fields: Vec<(&str, SqlValue)>,
) -> Result<Option<CompanyRow>, PostgresError> {
    let update = PartialUpdate::build(fields, COMPANY_UPDATE_COLUMNS, 1)?;
    let now = chrono::Utc::now().timestamp();

    let sql = format!(
        "UPDATE companies SET {}, updated_at = ${} WHERE handle = ${}",
        update.set_sql(),
        update.next_index(),
        update.next_index() + 1,
    );

    let query = sqlx::query(&sql);
    let result = value::bind_all(query, &update.values)
        .bind(now)
        .bind(handle)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_company(pool, handle).await
}

/// Delete a company by handle. Returns true if a row was deleted.
pub async fn delete_company(pool: &PgPool, handle: &str) -> Result<bool, PostgresError> {
    let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
        .bind(handle)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
