//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct ProbeStatus {
    pub status: &'static str,
}

/// Process is up; storage is not consulted.
pub async fn health() -> Json<ProbeStatus> {
    Json(ProbeStatus { status: "ok" })
}

/// Store answers a round trip.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ProbeStatus>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(ProbeStatus { status: "ready" })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeStatus {
                    status: "unavailable",
                }),
            )
        }
    }
}
