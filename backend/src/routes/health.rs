//! Health check endpoints
//!
//! - /health - process is up, reports name and version
//! - /health/ready - database reachable; 503 otherwise
//! - /health/live - always OK while the server runs

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseCheck>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Alive,
    Ready,
    NotReady,
}

/// Result of the database probe
#[derive(Serialize)]
pub struct DatabaseCheck {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn response(state: &AppState, status: HealthStatus, database: Option<DatabaseCheck>) -> HealthResponse {
    HealthResponse {
        status,
        service: state.config().api.project_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        database,
    }
}

/// Basic health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(response(&state, HealthStatus::Healthy, None))
}

/// Readiness probe, 503 while the database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let check = match db::health_check(state.db()).await {
        Ok(()) => DatabaseCheck {
            healthy: true,
            message: None,
        },
        Err(e) => DatabaseCheck {
            healthy: false,
            message: Some(e.to_string()),
        },
    };

    if check.healthy {
        (StatusCode::OK, Json(response(&state, HealthStatus::Ready, Some(check))))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(response(&state, HealthStatus::NotReady, Some(check))),
        )
    }
}

/// Liveness probe
pub async fn liveness_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(response(&state, HealthStatus::Alive, None))
}
