//! Query construction error types

use thiserror::Error;

/// Errors raised while building a query from client-supplied input.
///
/// All variants are deterministic for a given input and are raised before
/// any SQL is dispatched. None are retryable; the API layer maps every
/// variant to a 400 response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid value for filter {filter}: {value:?}")]
    InvalidFilterValue { filter: String, value: String },

    #[error("Invalid range: {min_filter} ({min}) is greater than {max_filter} ({max})")]
    InvalidRange {
        min_filter: &'static str,
        min: i64,
        max_filter: &'static str,
        max: i64,
    },

    #[error("No fields to update")]
    NoFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_names_the_key() {
        let err = QueryError::InvalidFilter("badKey".to_string());
        assert_eq!(err.to_string(), "Unknown filter: badKey");
    }

    #[test]
    fn invalid_range_display() {
        let err = QueryError::InvalidRange {
            min_filter: "minEmployees",
            min: 50,
            max_filter: "maxEmployees",
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid range: minEmployees (50) is greater than maxEmployees (10)"
        );
    }
}
