//! Service metadata handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use fathom_core::{EngineConfig, FinancialSnapshot, ForecastParams};

use super::EvaluateRequest;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health-check - Liveness check
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/config - Effective thresholds and assumptions
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<EngineConfig> {
    Json(state.engine.clone())
}

/// GET /api/sample - A ready-to-post request body
pub async fn get_sample() -> Json<EvaluateRequest> {
    Json(EvaluateRequest {
        snapshot: FinancialSnapshot::sample(),
        forecast: Some(ForecastParams::default()),
    })
}
