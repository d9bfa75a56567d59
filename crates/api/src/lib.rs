//! StudyTwin API Server
//!
//! REST API for the student analytics dashboard: authentication, daily
//! metrics submission, prediction orchestration (primary ML service
//! with rule-based fallback), and alert delivery.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod extract;
mod routes;
mod settings;

pub use error::ApiError;
pub use extract::AuthUser;
pub use settings::Settings;

use alerting::AlertEngine;
use ml_client::{MlClientError, MlServiceClient};
use storage::Repository;
use student_auth::TokenService;
use student_data::MetricsValidator;

/// Application state shared across handlers. Everything here is either
/// immutable or internally synchronized, so handlers share it through a
/// plain `Arc`.
pub struct AppState {
    /// Storage repository
    pub repository: Repository,
    /// Client for the primary prediction service
    pub ml_client: MlServiceClient,
    /// Token issuance and verification
    pub tokens: TokenService,
    /// Range validation for submissions
    pub validator: MetricsValidator,
    /// Threshold-based alert derivation
    pub alert_engine: AlertEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state from configuration and a connected
    /// repository.
    pub fn new(settings: &Settings, repository: Repository) -> Result<Self, MlClientError> {
        let ml_client = MlServiceClient::new(
            &settings.ml_service.base_url,
            Duration::from_secs(settings.ml_service.timeout_secs),
        )?;

        Ok(Self {
            repository,
            ml_client,
            tokens: TokenService::new(&settings.auth.jwt_secret, settings.auth.token_ttl_hours),
            validator: MetricsValidator::default(),
            alert_engine: AlertEngine::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        })
    }
}

/// Health response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/me", get(routes::auth::me))
        .route("/api/student/data", post(routes::student::submit_data))
        .route("/api/student/history", get(routes::student::history))
        .route("/api/predict", post(routes::predict::predict))
        .route("/api/predict/history", get(routes::predict::history))
        .route("/api/predict/latest", get(routes::predict::latest))
        .route("/api/alerts", get(routes::alerts::get_alerts))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "StudyTwin API is running".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown.
pub async fn run_server(state: Arc<AppState>, addr: &str) -> anyhow::Result<()> {
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
