//! Path and validation extractors for API routes

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Maximum length for job titles
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate a company handle: 1-64 ASCII alphanumeric chars, dash, underscore
pub fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle.len() <= 64
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Validate a job title path segment: 1-200 characters
pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && title.len() <= MAX_TITLE_LENGTH
}

/// Raw path extractor for company-scoped routes (internal use)
#[derive(Debug, Deserialize)]
struct CompanyPathRaw {
    handle: String,
}

/// Validated company path extractor.
///
/// Extracts and validates `handle` from URL path parameters.
/// Returns a 400 Bad Request if validation fails.
#[derive(Debug)]
pub struct CompanyPath {
    pub handle: String,
}

impl<S> FromRequestParts<S> for CompanyPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<CompanyPathRaw>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;

        if !is_valid_handle(&raw.handle) {
            return Err(ValidationRejection::InvalidHandle);
        }

        Ok(Self { handle: raw.handle })
    }
}

/// Raw path extractor for job routes (internal use)
#[derive(Debug, Deserialize)]
struct JobPathRaw {
    handle: String,
    title: String,
}

/// Validated job path extractor.
///
/// Extracts and validates `handle` and `title` from URL path parameters.
/// Returns a 400 Bad Request if validation fails.
#[derive(Debug)]
pub struct JobPath {
    pub handle: String,
    pub title: String,
}

impl<S> FromRequestParts<S> for JobPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<JobPathRaw>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;

        if !is_valid_handle(&raw.handle) {
            return Err(ValidationRejection::InvalidHandle);
        }
        if !is_valid_title(&raw.title) {
            return Err(ValidationRejection::InvalidTitle);
        }

        Ok(Self {
            handle: raw.handle,
            title: raw.title,
        })
    }
}

/// Validation rejection with structured error response
pub enum ValidationRejection {
    /// Failed to parse path parameters
    Path(PathRejection),
    /// Invalid company handle format
    InvalidHandle,
    /// Invalid job title format
    InvalidTitle,
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Path(rejection) => (
                StatusCode::BAD_REQUEST,
                "PATH_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::InvalidHandle => (
                StatusCode::BAD_REQUEST,
                "INVALID_HANDLE",
                "Invalid handle: must be 1-64 alphanumeric chars, dashes, or underscores"
                    .to_string(),
            ),
            Self::InvalidTitle => (
                StatusCode::BAD_REQUEST,
                "INVALID_TITLE",
                format!("Invalid title: must be 1-{} characters", MAX_TITLE_LENGTH),
            ),
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                "JSON_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format_validation_errors(&errors),
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// JSON body extractor with automatic validation.
///
/// Deserializes JSON body and validates it using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_validation() {
        assert!(is_valid_handle("acme"));
        assert!(is_valid_handle("acme-corp_2"));
        assert!(!is_valid_handle(""));
        assert!(!is_valid_handle("has space"));
        assert!(!is_valid_handle(&"x".repeat(65)));
    }

    #[test]
    fn test_handle_rejects_non_ascii_alphanumerics() {
        assert!(!is_valid_handle("ácme"));
        assert!(!is_valid_handle("acme①"));
        assert!(!is_valid_handle("акме"));
    }

    #[test]
    fn test_title_validation() {
        assert!(is_valid_title("Software Engineer"));
        assert!(!is_valid_title(""));
        assert!(!is_valid_title(&"x".repeat(201)));
    }
}
