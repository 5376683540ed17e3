//! Job API types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::extractors::MAX_TITLE_LENGTH;
use crate::api::routes::companies::types::validate_handle;
use crate::api::types::{double_option, not_nullable};
use crate::data::types::JobRow;

/// Job DTO for API responses. Equity serializes as a decimal string.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub title: String,
    pub salary: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobRow> for JobDto {
    fn from(row: JobRow) -> Self {
        Self {
            title: row.title,
            salary: row.salary,
            equity: row.equity,
            company_handle: row.company_handle,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
            updated_at: DateTime::from_timestamp(row.updated_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

fn validate_equity(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE {
        return Err(ValidationError::new("equity")
            .with_message("Equity must be between 0 and 1".into()));
    }
    Ok(())
}

/// Request body for creating a job
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(range(min = 0, message = "Salary must be non-negative"))]
    pub salary: Option<i64>,

    #[validate(custom(function = "validate_equity"))]
    #[schema(value_type = Option<String>)]
    pub equity: Option<Decimal>,

    #[validate(custom(function = "validate_handle"))]
    pub company_handle: String,
}

/// Request body for a partial job update.
///
/// The owning company cannot change: `companyHandle` is not a recognized
/// field here, and unknown fields are rejected at deserialization. The title
/// is part of the job's key and may move the resource, but cannot be null.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_job_update"))]
pub struct UpdateJobRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,

    /// Nullable: an explicit `null` clears the salary
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub salary: Option<Option<i64>>,

    /// Nullable: an explicit `null` clears the equity stake
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub equity: Option<Option<Decimal>>,
}

fn validate_job_update(body: &UpdateJobRequest) -> Result<(), ValidationError> {
    match &body.title {
        Some(None) => return Err(not_nullable("title")),
        Some(Some(title)) if title.is_empty() || title.len() > MAX_TITLE_LENGTH => {
            return Err(ValidationError::new("title")
                .with_message("Title must be 1-200 characters".into()));
        }
        _ => {}
    }

    if let Some(Some(salary)) = body.salary
        && salary < 0
    {
        return Err(ValidationError::new("salary")
            .with_message("Salary must be non-negative".into()));
    }

    if let Some(Some(equity)) = body.equity {
        validate_equity(&equity)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_body_rejects_company_handle() {
        let result = serde_json::from_str::<UpdateJobRequest>(
            r#"{"companyHandle": "other", "title": "Engineer"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_equity_range_enforced() {
        let body: CreateJobRequest = serde_json::from_str(
            r#"{"title": "Engineer", "equity": "1.5", "companyHandle": "acme"}"#,
        )
        .unwrap();
        assert!(body.validate().is_err());

        let body: CreateJobRequest = serde_json::from_str(
            r#"{"title": "Engineer", "equity": "0.05", "companyHandle": "acme"}"#,
        )
        .unwrap();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_patch_null_distinguished_from_absent() {
        let body: UpdateJobRequest = serde_json::from_str(r#"{"salary": null}"#).unwrap();
        assert_eq!(body.salary, Some(None));
        assert_eq!(body.equity, None);
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_patch_null_title_rejected() {
        let body: UpdateJobRequest = serde_json::from_str(r#"{"title": null}"#).unwrap();
        let errors = body.validate().unwrap_err();
        let messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();
        assert_eq!(messages, vec!["title cannot be null".to_string()]);
    }

    #[test]
    fn test_patch_equity_range_enforced() {
        let body: UpdateJobRequest = serde_json::from_str(r#"{"equity": "2"}"#).unwrap();
        assert!(body.validate().is_err());

        let body: UpdateJobRequest = serde_json::from_str(r#"{"equity": "0.5"}"#).unwrap();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_equity_serializes_as_string() {
        let dto = JobDto {
            title: "Engineer".to_string(),
            salary: Some(120_000),
            equity: Some(Decimal::new(5, 2)),
            company_handle: "acme".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["equity"], serde_json::json!("0.05"));
    }
}
