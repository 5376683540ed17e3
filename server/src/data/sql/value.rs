//! Positional SQL parameter values
//!
//! Dynamic fragments produce heterogeneous parameter lists. `SqlValue`
//! enumerates the types the company/job tables bind and knows how to attach
//! itself to a sqlx Postgres query, keeping the fragment text value-free.

use rust_decimal::Decimal;
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};

/// Column type selector for typed NULL binds.
///
/// Postgres infers parameter types from the bind, so a NULL must still be
/// sent with the type of the column it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Int,
    Numeric,
    Bool,
}

/// A single positional parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Numeric(Decimal),
    Bool(bool),
    Null(SqlType),
}

impl SqlValue {
    /// Bind this value onto a `sqlx::query` builder
    pub fn bind_to<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            Self::Text(v) => query.bind(v),
            Self::Int(v) => query.bind(v),
            Self::Numeric(v) => query.bind(v),
            Self::Bool(v) => query.bind(v),
            Self::Null(SqlType::Text) => query.bind(None::<String>),
            Self::Null(SqlType::Int) => query.bind(None::<i64>),
            Self::Null(SqlType::Numeric) => query.bind(None::<Decimal>),
            Self::Null(SqlType::Bool) => query.bind(None::<bool>),
        }
    }

    /// Bind this value onto a `sqlx::query_as` builder
    pub fn bind_to_query_as<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            Self::Text(v) => query.bind(v),
            Self::Int(v) => query.bind(v),
            Self::Numeric(v) => query.bind(v),
            Self::Bool(v) => query.bind(v),
            Self::Null(SqlType::Text) => query.bind(None::<String>),
            Self::Null(SqlType::Int) => query.bind(None::<i64>),
            Self::Null(SqlType::Numeric) => query.bind(None::<Decimal>),
            Self::Null(SqlType::Bool) => query.bind(None::<bool>),
        }
    }
}

/// Bind a parameter list onto a query in order
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlValue],
) -> Query<'q, Postgres, PgArguments> {
    for value in params {
        query = value.bind_to(query);
    }
    query
}

/// Bind a parameter list onto a `query_as` in order
pub fn bind_all_query_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [SqlValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in params {
        query = value.bind_to_query_as(query);
    }
    query
}
