//! Prediction Routes
//!
//! `POST /api/predict` orchestrates the two prediction paths: try the
//! primary ML service within its timeout, and on any failure substitute
//! the rule-based fallback. A primary failure is never surfaced to the
//! caller; the concrete reason is logged so degraded-mode operation
//! stays visible.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::routes::student::MetricsRequest;
use crate::AppState;
use storage::PredictionRow;
use student_data::PredictionOutcome;

/// Prediction response, camelCase for the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionDto {
    pub burnout_risk: String,
    pub attendance_risk: f64,
    pub exam_performance: f64,
}

impl From<PredictionOutcome> for PredictionDto {
    fn from(outcome: PredictionOutcome) -> Self {
        Self {
            burnout_risk: outcome.burnout_risk.as_str().to_string(),
            attendance_risk: outcome.attendance_risk,
            exam_performance: outcome.exam_performance,
        }
    }
}

/// Stored prediction with identity, for history/latest.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecordDto {
    pub id: i64,
    pub burnout_risk: String,
    pub attendance_risk: f64,
    pub exam_performance: f64,
    pub created_at: DateTime<Utc>,
}

impl From<PredictionRow> for PredictionRecordDto {
    fn from(row: PredictionRow) -> Self {
        Self {
            id: row.id,
            burnout_risk: row.burnout_risk,
            attendance_risk: row.attendance_risk,
            exam_performance: row.exam_performance,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// POST /api/predict
pub async fn predict(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<MetricsRequest>,
) -> Result<Json<PredictionDto>, ApiError> {
    let metrics = body.into_metrics()?;

    // Gateway contract: the predictors trust their input, so validation
    // happens here, once, before either path runs.
    state
        .validator
        .validate(&metrics)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let outcome = match state.ml_client.predict(&metrics).await {
        Ok(outcome) => outcome,
        Err(err) => {
            // Any failure (timeout, transport, non-2xx, undecodable
            // body) takes the fallback path.
            warn!(error = %err, "primary prediction service failed, using fallback");
            fallback::predict(&metrics)
        }
    };

    // The prediction is persisted only when a metrics submission exists
    // to link it to; it is returned to the caller either way.
    if let Some(student_data_id) = state.repository.latest_metrics_id(auth.id).await? {
        state
            .repository
            .insert_prediction(auth.id, Some(student_data_id), &outcome)
            .await?;
    }

    Ok(Json(PredictionDto::from(outcome)))
}

/// GET /api/predict/history?limit=
pub async fn history(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<PredictionRecordDto>>, ApiError> {
    let rows = state.repository.prediction_history(auth.id, params.limit).await?;
    Ok(Json(rows.into_iter().map(PredictionRecordDto::from).collect()))
}

/// GET /api/predict/latest
pub async fn latest(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<PredictionRecordDto>, ApiError> {
    let row = state
        .repository
        .latest_prediction(auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No predictions found".to_string()))?;

    Ok(Json(PredictionRecordDto::from(row)))
}
