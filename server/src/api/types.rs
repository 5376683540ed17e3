//! Shared API types
//!
//! Common error handling used across all API endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use validator::ValidationError;

use crate::data::postgres::PostgresError;
use crate::data::sql::QueryError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Map a malformed filter or update to a client error
    pub fn from_query(e: QueryError) -> Self {
        let code = match &e {
            QueryError::InvalidFilter(_) => "INVALID_FILTER",
            QueryError::InvalidFilterValue { .. } => "INVALID_FILTER_VALUE",
            QueryError::InvalidRange { .. } => "INVALID_RANGE",
            QueryError::NoFields => "NO_FIELDS",
        };
        Self::bad_request(code, e.to_string())
    }

    /// Map a storage error to a response.
    ///
    /// Conflicts and query errors carry their detail to the client; anything
    /// else is logged and surfaced as a generic internal error.
    pub fn from_postgres(e: PostgresError) -> Self {
        match e {
            PostgresError::Conflict(message) => Self::conflict("ALREADY_EXISTS", message),
            PostgresError::Query(query_error) => Self::from_query(query_error),
            other => {
                tracing::error!(error = %other, "PostgreSQL error");
                Self::Internal {
                    message: "Database operation failed".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Deserialize a nullable PATCH field: absent, explicit null, and a value
/// are three distinct states (`None`, `Some(None)`, `Some(Some(v))`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Validation error for a non-nullable field sent as an explicit `null`
pub fn not_nullable(field: &'static str) -> ValidationError {
    ValidationError::new(field).with_message(format!("{} cannot be null", field).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_errors_map_to_bad_request() {
        let err = ApiError::from_query(QueryError::InvalidFilter("badKey".to_string()));
        match err {
            ApiError::BadRequest { code, message } => {
                assert_eq!(code, "INVALID_FILTER");
                assert!(message.contains("badKey"));
            }
            other => panic!("expected BadRequest, got {:?}", other),
        }

        let err = ApiError::from_query(QueryError::NoFields);
        assert!(matches!(err, ApiError::BadRequest { ref code, .. } if code == "NO_FIELDS"));
    }

    #[test]
    fn test_conflict_maps_to_conflict() {
        let err = ApiError::from_postgres(PostgresError::Conflict("dup".to_string()));
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[test]
    fn test_query_error_passes_through_postgres_wrapper() {
        let err = ApiError::from_postgres(PostgresError::Query(QueryError::NoFields));
        assert!(matches!(err, ApiError::BadRequest { ref code, .. } if code == "NO_FIELDS"));
    }

    #[test]
    fn test_other_storage_errors_are_generic() {
        let err = ApiError::from_postgres(PostgresError::Config("bad url".to_string()));
        match err {
            ApiError::Internal { message } => assert_eq!(message, "Database operation failed"),
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn test_double_option_distinguishes_null_from_value() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default, deserialize_with = "double_option")]
            field: Option<Option<i64>>,
        }

        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.field, None);

        let null: Body = serde_json::from_str(r#"{"field": null}"#).unwrap();
        assert_eq!(null.field, Some(None));

        let value: Body = serde_json::from_str(r#"{"field": 7}"#).unwrap();
        assert_eq!(value.field, Some(Some(7)));
    }
}
