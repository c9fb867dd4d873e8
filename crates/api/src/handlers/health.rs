use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Journaled registrations still awaiting reconciliation.
    pub pending_fallback: usize,
}

/// GET /health -- service, database, and reconciliation health.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = karvan_db::health_check(&state.pool).await.is_ok();

    let pending_fallback = state
        .registrations
        .journal()
        .unsynced_count()
        .await
        .unwrap_or(0);

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        pending_fallback,
    })
}
