//! Fathom Web Server
//!
//! Axum-based JSON API over the Fathom metrics engine.
//!
//! The server is stateless apart from the engine configuration loaded at
//! startup; every request evaluates the posted snapshot from scratch.
//!
//! Security features:
//! - Restrictive CORS policy (same-origin unless origins are configured)
//! - Input validation before any computation
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use fathom_core::EngineConfig;

mod handlers;

pub use handlers::{EvaluateRequest, MetricsResponse, RecommendationsResponse};

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub engine: EngineConfig,
    pub config: ServerConfig,
}

/// Create the API router
pub fn create_router(engine: EngineConfig, config: ServerConfig) -> Router {
    let cors = build_cors(&config);

    let state = Arc::new(AppState { engine, config });

    let api_routes = Router::new()
        .route("/health-check", get(handlers::health_check))
        .route("/config", get(handlers::get_config))
        .route("/sample", get(handlers::get_sample))
        .route("/evaluate", post(handlers::evaluate_snapshot))
        .route("/metrics", post(handlers::compute_metrics))
        .route("/recommendations", post(handlers::get_recommendations))
        .route("/forecast", post(handlers::compute_forecast));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        return cors;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
}

pub async fn serve_with_config(
    engine: EngineConfig,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(engine, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Bad input is the caller's problem and safe to echo back
        if let Some(core) = err.downcast_ref::<fathom_core::Error>() {
            if core.is_validation() {
                return Self::bad_request(&core.to_string());
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

/// Unwrap a JSON body, turning malformed payloads into 400s
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected request body");
            Err(AppError::bad_request(&rejection.body_text()))
        }
    }
}

#[cfg(test)]
mod tests;
