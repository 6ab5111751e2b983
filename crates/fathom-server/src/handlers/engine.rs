//! Evaluation handlers
//!
//! Every endpoint takes an `EvaluateRequest`, validates it, and runs the
//! relevant part of the engine against the server's config.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{json_body, AppError, AppState};
use fathom_core::{
    aggregate, analyze_budget, compute_health, evaluate, project, recommend_with, DerivedTotals,
    FinancialReport, FinancialSnapshot, ForecastParams, ForecastResult, HealthMetrics,
};

/// Request body shared by all evaluation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub snapshot: FinancialSnapshot,
    /// Forecast parameters (defaults when omitted)
    #[serde(default)]
    pub forecast: Option<ForecastParams>,
}

impl EvaluateRequest {
    fn params(&self) -> ForecastParams {
        self.forecast.clone().unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub totals: DerivedTotals,
    pub health: HealthMetrics,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<String>,
    pub budget_suggestions: Vec<String>,
}

/// POST /api/evaluate - Full report
pub async fn evaluate_snapshot(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<FinancialReport>, AppError> {
    let request = json_body(payload)?;
    let report = evaluate(&request.snapshot, &request.params(), &state.engine)?;

    tracing::info!(
        score = report.health.score.total,
        band = %report.health.score.band,
        "Evaluated snapshot"
    );

    Ok(Json(report))
}

/// POST /api/metrics - Totals and health metrics only
pub async fn compute_metrics(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<MetricsResponse>, AppError> {
    let request = json_body(payload)?;
    request.snapshot.validate()?;

    let totals = aggregate(&request.snapshot);
    let health = compute_health(&totals, &request.snapshot, &state.engine.thresholds);

    Ok(Json(MetricsResponse { totals, health }))
}

/// POST /api/recommendations - Advice plus 50/30/20 budget suggestions
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let request = json_body(payload)?;
    let snapshot = &request.snapshot;
    snapshot.validate()?;

    let totals = aggregate(snapshot);
    let health = compute_health(&totals, snapshot, &state.engine.thresholds);

    Ok(Json(RecommendationsResponse {
        recommendations: recommend_with(&health, snapshot, &state.engine.thresholds),
        budget_suggestions: analyze_budget(&totals, snapshot).suggestions,
    }))
}

/// POST /api/forecast - Goal, retirement and what-if projections
pub async fn compute_forecast(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<ForecastResult>, AppError> {
    let request = json_body(payload)?;
    request.snapshot.validate()?;

    let totals = aggregate(&request.snapshot);
    let forecast = project(
        &totals,
        &request.snapshot,
        &request.params(),
        &state.engine.assumptions,
    )?;

    Ok(Json(forecast))
}
