//! Job repository
//!
//! Jobs are keyed by the (title, company_handle) pair. Titles are mutable,
//! so updates return the row via RETURNING rather than re-fetching by key.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::map_key_conflict;
use crate::data::postgres::PostgresError;
use crate::data::sql::filter::JobFilters;
use crate::data::sql::update::{JOB_UPDATE_COLUMNS, PartialUpdate};
use crate::data::sql::value::{self, SqlValue};
use crate::data::types::JobRow;

type JobTuple = (String, Option<i64>, Option<Decimal>, String, i64, i64);

const JOB_COLUMNS: &str = "title, salary, equity, company_handle, created_at, updated_at";

fn to_row((title, salary, equity, company_handle, created_at, updated_at): JobTuple) -> JobRow {
    JobRow {
        title,
        salary,
        equity,
        company_handle,
        created_at,
        updated_at,
    }
}

/// Create a job under a company. Returns `None` if the company does not
/// exist, and a conflict error if the company already has a job with this
/// title.
pub async fn create_job(
    pool: &PgPool,
    title: &str,
    salary: Option<i64>,
    equity: Option<Decimal>,
    company_handle: &str,
) -> Result<Option<JobRow>, PostgresError> {
    let company_exists: Option<i32> =
        sqlx::query_scalar("SELECT 1 FROM companies WHERE handle = $1")
            .bind(company_handle)
            .fetch_optional(pool)
            .await?;
    if company_exists.is_none() {
        return Ok(None);
    }

    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO jobs (title, salary, equity, company_handle, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(title)
    .bind(salary)
    .bind(equity)
    .bind(company_handle)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        map_key_conflict(
            e,
            format!("Job already exists: {} at {}", title, company_handle),
        )
    })?;

    Ok(Some(JobRow {
        title: title.to_string(),
        salary,
        equity,
        company_handle: company_handle.to_string(),
        created_at: now,
        updated_at: now,
    }))
}

/// List jobs matching the supplied filters, ordered by title
pub async fn list_jobs(pool: &PgPool, filters: &JobFilters) -> Result<Vec<JobRow>, PostgresError> {
    let clause = filters.where_clause(1);
    let sql = format!(
        "SELECT {} FROM jobs{} ORDER BY title ASC",
        JOB_COLUMNS, clause.sql
    );

    let query = sqlx::query_as::<_, JobTuple>(&sql);
    let rows = value::bind_all_query_as(query, &clause.params)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(to_row).collect())
}

/// List all jobs belonging to one company, ordered by title
pub async fn list_jobs_for_company(
    pool: &PgPool,
    company_handle: &str,
) -> Result<Vec<JobRow>, PostgresError> {
    let sql = format!(
        "SELECT {} FROM jobs WHERE company_handle = $1 ORDER BY title ASC",
        JOB_COLUMNS
    );
    let rows = sqlx::query_as::<_, JobTuple>(&sql)
        .bind(company_handle)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(to_row).collect())
}

/// Get a job by its (title, company_handle) key
pub async fn get_job(
    pool: &PgPool,
    company_handle: &str,
    title: &str,
) -> Result<Option<JobRow>, PostgresError> {
    let sql = format!(
        "SELECT {} FROM jobs WHERE company_handle = $1 AND title = $2",
        JOB_COLUMNS
    );
    let row = sqlx::query_as::<_, JobTuple>(&sql)
        .bind(company_handle)
        .bind(title)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(to_row))
}

/// Apply a partial update to a job. Returns the updated job, or `None` if
/// no job matches the key. A title change that collides with another job at
/// the same company surfaces as a conflict.
pub async fn update_job(
    pool: &PgPool,
    company_handle: &str,
    title: &str,
    fields: Vec<(&str, SqlValue)>,
) -> Result<Option<JobRow>, PostgresError> {
    let update = PartialUpdate::build(fields, JOB_UPDATE_COLUMNS, 1)?;
    let now = chrono::Utc::now().timestamp();

    let sql = format!(
        "UPDATE jobs SET {}, updated_at = ${} WHERE company_handle = ${} AND title = ${} RETURNING {}",
        update.set_sql(),
        update.next_index(),
        update.next_index() + 1,
        update.next_index() + 2,
        JOB_COLUMNS,
    );

    let query = sqlx::query_as::<_, JobTuple>(&sql);
    let row = value::bind_all_query_as(query, &update.values)
        .bind(now)
        .bind(company_handle)
        .bind(title)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            map_key_conflict(
                e,
                format!("Job already exists at {}", company_handle),
            )
        })?;

    Ok(row.map(to_row))
}

/// Delete a job by its key. Returns true if a row was deleted.
pub async fn delete_job(
    pool: &PgPool,
    company_handle: &str,
    title: &str,
) -> Result<bool, PostgresError> {
    let result = sqlx::query("DELETE FROM jobs WHERE company_handle = $1 AND title = $2")
        .bind(company_handle)
        .bind(title)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
