//! Per-entity repository functions

pub mod company;
pub mod job;

use crate::data::postgres::PostgresError;

/// Unique violations surface as conflicts carrying the given message.
///
/// The pre-insert existence checks are racy on their own; the key constraints
/// back them, and a violation maps to the same conflict outcome.
pub(crate) fn map_key_conflict(e: sqlx::Error, message: String) -> PostgresError {
    match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            PostgresError::Conflict(message)
        }
        _ => PostgresError::Database(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct FakeDbError(&'static str);

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "database error {}", self.0)
        }
    }

    impl StdError for FakeDbError {}

    impl sqlx::error::DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.0 {
                "23505" => sqlx::error::ErrorKind::UniqueViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        let e = sqlx::Error::Database(Box::new(FakeDbError("23505")));
        let mapped = map_key_conflict(e, "Company already exists: acme".to_string());
        match mapped {
            PostgresError::Conflict(message) => {
                assert_eq!(message, "Company already exists: acme");
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn other_errors_pass_through_as_database() {
        let e = sqlx::Error::Database(Box::new(FakeDbError("23503")));
        assert!(matches!(
            map_key_conflict(e, String::new()),
            PostgresError::Database(_)
        ));

        assert!(matches!(
            map_key_conflict(sqlx::Error::RowNotFound, String::new()),
            PostgresError::Database(_)
        ));
    }
}
