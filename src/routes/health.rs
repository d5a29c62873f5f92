use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::db;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub services: ServiceHealth,
}

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub database: &'static str,
    pub redis: &'static str,
}

fn status_label(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "error"
    }
}

/// Overall status: the database is critical, Redis only degrades caching
fn overall_status(database_ok: bool, redis_ok: bool) -> (StatusCode, &'static str) {
    match (database_ok, redis_ok) {
        (true, true) => (StatusCode::OK, "healthy"),
        (true, false) => (StatusCode::OK, "degraded"),
        (false, _) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
    }
}

/// Health check endpoint - public
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (database_ok, redis_result) =
        tokio::join!(db::health_check(&state.db), state.cache.health_check());
    let redis_ok = redis_result.is_ok();

    let (status_code, status) = overall_status(database_ok, redis_ok);

    (
        status_code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            services: ServiceHealth {
                database: status_label(database_ok),
                redis: status_label(redis_ok),
            },
        }),
    )
}
