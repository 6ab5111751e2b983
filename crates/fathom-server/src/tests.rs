//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use fathom_core::test_utils::{all_green_snapshot, all_red_snapshot};
use fathom_core::{recommend::ALL_CLEAR, FinancialSnapshot};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    create_router(EngineConfig::default(), ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn request_for(snapshot: FinancialSnapshot) -> serde_json::Value {
    serde_json::json!({ "snapshot": snapshot })
}

// ========== Meta API Tests ==========

#[tokio::test]
async fn test_health_check() {
    let response = setup_test_app()
        .oneshot(get("/api/health-check"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_get_config_reflects_engine() {
    let mut engine = EngineConfig::default();
    engine.assumptions.withdrawal_rate = 0.03;
    let app = create_router(engine, ServerConfig::default());

    let response = app.oneshot(get("/api/config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["assumptions"]["withdrawal_rate"], 0.03);
    assert_eq!(json["thresholds"]["savings_rate"]["direction"], "higher_is_better");
}

#[tokio::test]
async fn test_sample_round_trips_through_evaluate() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/api/sample")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let sample = get_body_json(response).await;
    assert_eq!(sample["snapshot"]["income"]["salary"], 4000.0);

    let response = app.oneshot(post_json("/api/evaluate", sample)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = get_body_json(response).await;
    assert_eq!(report["totals"]["monthly_savings"], 300.0);
    assert_eq!(report["health"]["savings_rate"]["status"], "danger");
    assert_eq!(report["budget"]["highest_category"], "Debt Payments");
    assert_eq!(report["forecast"]["retirement"]["years_to_retirement"], 35);
}

// ========== Evaluation API Tests ==========

#[tokio::test]
async fn test_metrics_endpoint() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/metrics",
            request_for(FinancialSnapshot::sample()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["totals"]["net_worth"], 128_000.0);
    assert_eq!(json["health"]["debt_to_income"]["status"], "warning");
    assert_eq!(json["health"]["score"]["band"], "danger");
}

#[tokio::test]
async fn test_recommendations_all_green() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/recommendations",
            request_for(all_green_snapshot()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["recommendations"], serde_json::json!([ALL_CLEAR]));
    assert!(!json["budget_suggestions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommendations_all_red() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/recommendations",
            request_for(all_red_snapshot()),
        ))
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_recommendations_follow_configured_thresholds() {
    let mentions_savings = |json: &serde_json::Value| {
        json["recommendations"]
            .as_array()
            .unwrap()
            .iter()
            .any(|r| r.as_str().unwrap().contains("savings rate"))
    };

    let response = setup_test_app()
        .oneshot(post_json(
            "/api/recommendations",
            request_for(FinancialSnapshot::sample()),
        ))
        .await
        .unwrap();
    assert!(mentions_savings(&get_body_json(response).await));

    let mut engine = EngineConfig::default();
    engine.thresholds.savings_rate.cutoffs = [5.0, 6.0];
    let response = create_router(engine, ServerConfig::default())
        .oneshot(post_json(
            "/api/recommendations",
            request_for(FinancialSnapshot::sample()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!mentions_savings(&get_body_json(response).await));
}

#[tokio::test]
async fn test_forecast_with_params() {
    let body = serde_json::json!({
        "snapshot": FinancialSnapshot::sample(),
        "forecast": {
            "current_age": 30,
            "retirement_age": 65,
            "annual_return": 0.0,
            "additional_savings": 100.0
        }
    });

    let response = setup_test_app()
        .oneshot(post_json("/api/forecast", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["goal"]["status"], "projected");
    // 40000 unchanged at 0%, plus 150/month for 35 years
    assert_eq!(json["retirement"]["total_savings"], 103_000.0);
    assert_eq!(json["what_if"]["additional_savings"], 100.0);
}

#[tokio::test]
async fn test_forecast_unreachable_goal() {
    let mut snapshot = FinancialSnapshot::sample();
    snapshot.expenses.other = 2000.0;

    let response = setup_test_app()
        .oneshot(post_json("/api/forecast", request_for(snapshot)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["goal"]["status"], "unreachable");
}

// ========== Error Handling Tests ==========

#[tokio::test]
async fn test_negative_amount_is_bad_request() {
    let mut snapshot = FinancialSnapshot::sample();
    snapshot.debts.mortgage = -1.0;

    let response = setup_test_app()
        .oneshot(post_json("/api/evaluate", request_for(snapshot)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("debts.mortgage"));
}

#[tokio::test]
async fn test_inverted_ages_is_bad_request() {
    let body = serde_json::json!({
        "snapshot": FinancialSnapshot::sample(),
        "forecast": { "current_age": 70, "retirement_age": 65 }
    });

    let response = setup_test_app()
        .oneshot(post_json("/api/forecast", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/metrics")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = setup_test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = setup_test_app()
        .oneshot(get("/api/nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_app_error_from_core_errors() {
    let validation = AppError::from(fathom_core::Error::Validation("bad".to_string()));
    assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

    let config = AppError::from(fathom_core::Error::Config("broken".to_string()));
    assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ========== CORS Tests ==========

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let config = ServerConfig {
        allowed_origins: vec!["http://localhost:5173".to_string()],
    };
    let app = create_router(EngineConfig::default(), config);

    let request = Request::builder()
        .uri("/api/health-check")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_cors_same_origin_by_default() {
    let request = Request::builder()
        .uri("/api/health-check")
        .header("origin", "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = setup_test_app().oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
