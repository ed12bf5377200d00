//! Health probe for the Resto Back-Office API

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub database: &'static str,
}

/// Report service liveness and database reachability
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();

    Json(HealthResponse {
        status: if db_ok { "ok" } else { "degraded" },
        service: "resto-backoffice",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        database: if db_ok { "connected" } else { "unreachable" },
    })
}
