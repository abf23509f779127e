//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub status: &'static str,
}

/// GET /health: the process is up. Does not touch the store.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        status: "ok",
    })
}
