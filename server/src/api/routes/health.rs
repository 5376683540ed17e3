//! Health check endpoint
//!
//! Liveness plus a database reachability probe. The process answering at all
//! means the HTTP layer is up; `database` reports whether the pool can still
//! run a query.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::postgres::PostgresService;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// Build the health route
pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    Router::new()
        .route("/api/v1/health", get(health))
        .with_state(database)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health including database reachability", body = HealthResponse)
    )
)]
pub async fn health(State(database): State<Arc<PostgresService>>) -> impl IntoResponse {
    let database_status = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(database.pool())
        .await
    {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            "unreachable"
        }
    };

    let status = if database_status == "ok" {
        "ok"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: database_status,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_reports_database_state() {
        let healthy = HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            database: "ok",
        };
        let json = serde_json::to_value(&healthy).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "ok");

        let degraded = HealthResponse {
            status: "degraded",
            version: env!("CARGO_PKG_VERSION"),
            database: "unreachable",
        };
        let json = serde_json::to_value(&degraded).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["database"], "unreachable");
    }
}
