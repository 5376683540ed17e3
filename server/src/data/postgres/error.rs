//! PostgreSQL error types

use thiserror::Error;

use crate::data::sql::QueryError;

#[derive(Error, Debug)]
pub enum PostgresError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_failed_display() {
        let err = PostgresError::MigrationFailed {
            version: 2,
            name: "add_jobs_table".to_string(),
            error: "syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Migration 2 (add_jobs_table) failed: syntax error"
        );
    }

    #[test]
    fn query_error_passes_through_unchanged() {
        let err = PostgresError::from(QueryError::NoFields);
        assert_eq!(err.to_string(), "No fields to update");
    }
}
