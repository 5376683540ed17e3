//! Company API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::extractors::is_valid_handle;
use crate::api::routes::jobs::types::JobDto;
use crate::api::types::{double_option, not_nullable};
use crate::data::types::CompanyRow;

/// Company DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: i64,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for CompanyDto {
    fn from(row: CompanyRow) -> Self {
        Self {
            handle: row.handle,
            name: row.name,
            description: row.description,
            num_employees: row.num_employees,
            logo_url: row.logo_url,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
            updated_at: DateTime::from_timestamp(row.updated_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Company detail DTO: the company plus all of its jobs
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyDetailDto {
    #[serde(flatten)]
    pub company: CompanyDto,
    pub jobs: Vec<JobDto>,
}

pub fn validate_handle(handle: &str) -> Result<(), ValidationError> {
    if !is_valid_handle(handle) {
        return Err(ValidationError::new("handle").with_message(
            "Handle must be 1-64 alphanumeric chars, dashes, or underscores".into(),
        ));
    }
    Ok(())
}

/// Request body for creating a company
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCompanyRequest {
    #[validate(custom(function = "validate_handle"))]
    pub handle: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Optional; stored as an empty string when omitted
    pub description: Option<String>,

    #[validate(range(min = 0, message = "numEmployees must be non-negative"))]
    pub num_employees: Option<i64>,

    #[validate(length(max = 2048, message = "logoUrl must be at most 2048 characters"))]
    pub logo_url: Option<String>,
}

/// Request body for a partial company update.
///
/// The handle is the company's identity and cannot be changed; sending it
/// (or any unknown field) is rejected at deserialization. Every field
/// distinguishes absent from explicit `null`; only `logoUrl` accepts null.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_company_update"))]
pub struct UpdateCompanyRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub num_employees: Option<Option<i64>>,

    /// Nullable: an explicit `null` clears the logo
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub logo_url: Option<Option<String>>,
}

fn validate_company_update(body: &UpdateCompanyRequest) -> Result<(), ValidationError> {
    match &body.name {
        Some(None) => return Err(not_nullable("name")),
        Some(Some(name)) if name.is_empty() || name.len() > 100 => {
            return Err(ValidationError::new("name")
                .with_message("Name must be 1-100 characters".into()));
        }
        _ => {}
    }

    if let Some(None) = body.description {
        return Err(not_nullable("description"));
    }

    match body.num_employees {
        Some(None) => return Err(not_nullable("numEmployees")),
        Some(Some(n)) if n < 0 => {
            return Err(ValidationError::new("num_employees")
                .with_message("numEmployees must be non-negative".into()));
        }
        _ => {}
    }

    if let Some(Some(url)) = &body.logo_url
        && url.len() > 2048
    {
        return Err(ValidationError::new("logo_url")
            .with_message("logoUrl must be at most 2048 characters".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_body_rejects_handle() {
        let result = serde_json::from_str::<UpdateCompanyRequest>(
            r#"{"handle": "new-handle", "name": "Acme"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_body_null_clears_logo() {
        let body: UpdateCompanyRequest =
            serde_json::from_str(r#"{"logoUrl": null}"#).unwrap();
        assert_eq!(body.logo_url, Some(None));
        assert!(body.validate().is_ok());

        let body: UpdateCompanyRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(body.logo_url, None);
    }

    #[test]
    fn test_patch_null_rejected_for_non_nullable_fields() {
        for (json, field) in [
            (r#"{"name": null}"#, "name"),
            (r#"{"description": null}"#, "description"),
            (r#"{"numEmployees": null}"#, "numEmployees"),
        ] {
            let body: UpdateCompanyRequest = serde_json::from_str(json).unwrap();
            let errors = body.validate().unwrap_err();
            let messages: Vec<String> = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect();
            assert_eq!(messages, vec![format!("{} cannot be null", field)]);
        }
    }

    #[test]
    fn test_patch_value_constraints_still_apply() {
        let body: UpdateCompanyRequest =
            serde_json::from_str(r#"{"numEmployees": -5}"#).unwrap();
        assert!(body.validate().is_err());

        let body: UpdateCompanyRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_create_validates_handle_shape() {
        let body: CreateCompanyRequest =
            serde_json::from_str(r#"{"handle": "bad handle", "name": "Acme"}"#).unwrap();
        assert!(body.validate().is_err());
    }
}
