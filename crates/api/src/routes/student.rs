//! Student Data Routes

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::AppState;
use storage::MetricsRecord;
use student_data::DailyMetrics;

/// Incoming submission, camelCase at the HTTP edge. Fields are optional
/// so a missing field yields the contract's 400 instead of a decode
/// rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRequest {
    pub sleep_hours: Option<f64>,
    pub attendance_percentage: Option<f64>,
    pub study_hours: Option<f64>,
    pub stress_level: Option<i32>,
    pub deadlines_count: Option<i32>,
}

impl MetricsRequest {
    /// Presence check, then assemble the domain type.
    pub fn into_metrics(self) -> Result<DailyMetrics, ApiError> {
        let missing = || ApiError::BadRequest("All fields are required".to_string());
        Ok(DailyMetrics {
            sleep_hours: self.sleep_hours.ok_or_else(missing)?,
            attendance_percentage: self.attendance_percentage.ok_or_else(missing)?,
            study_hours: self.study_hours.ok_or_else(missing)?,
            stress_level: self.stress_level.ok_or_else(missing)?,
            deadlines_count: self.deadlines_count.ok_or_else(missing)?,
        })
    }
}

/// Stored submission, camelCase for the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDto {
    pub id: i64,
    pub sleep_hours: f64,
    pub attendance_percentage: f64,
    pub study_hours: f64,
    pub stress_level: i64,
    pub deadlines_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<MetricsRecord> for MetricsDto {
    fn from(record: MetricsRecord) -> Self {
        Self {
            id: record.id,
            sleep_hours: record.sleep_hours,
            attendance_percentage: record.attendance_percentage,
            study_hours: record.study_hours,
            stress_level: record.stress_level,
            deadlines_count: record.deadlines_count,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    30
}

/// POST /api/student/data
pub async fn submit_data(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<MetricsRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let metrics = body.into_metrics()?;

    state
        .validator
        .validate(&metrics)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let record = state.repository.insert_metrics(auth.id, &metrics).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Data submitted successfully",
            "data": MetricsDto::from(record),
        })),
    ))
}

/// GET /api/student/history?limit=
pub async fn history(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<MetricsDto>>, ApiError> {
    let records = state.repository.metrics_history(auth.id, params.limit).await?;
    Ok(Json(records.into_iter().map(MetricsDto::from).collect()))
}
