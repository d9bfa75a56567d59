//! Alert Routes

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::warn;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::AppState;
use alerting::{Alert, Severity};
use student_data::{BurnoutRisk, PredictionOutcome};

/// How many stored alerts accompany the derived ones.
const STORED_ALERT_LIMIT: i64 = 10;

/// GET /api/alerts
///
/// Alerts derived from the latest prediction, followed by stored
/// unread alerts.
pub async fn get_alerts(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let mut alerts = Vec::new();

    if let Some(row) = state.repository.latest_prediction(auth.id).await? {
        match row.burnout_risk.parse::<BurnoutRisk>() {
            Ok(burnout_risk) => {
                let outcome = PredictionOutcome {
                    burnout_risk,
                    attendance_risk: row.attendance_risk,
                    exam_performance: row.exam_performance,
                };
                alerts.extend(state.alert_engine.evaluate(&outcome));
            }
            Err(reason) => {
                warn!(prediction_id = row.id, %reason, "skipping alert derivation");
            }
        }
    }

    let stored = state.repository.unread_alerts(auth.id, STORED_ALERT_LIMIT).await?;
    alerts.extend(stored.into_iter().map(|record| Alert {
        severity: match record.severity.as_str() {
            "danger" => Severity::Danger,
            _ => Severity::Warning,
        },
        title: record.title,
        message: record.message,
    }));

    Ok(Json(alerts))
}
