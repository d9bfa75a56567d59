//! ML Service Client
//!
//! HTTP client for the primary prediction service. The client reports
//! failures through a typed taxonomy and never falls back itself;
//! fallback policy belongs to the caller.

use std::time::Duration;

use serde::Deserialize;
use student_data::{DailyMetrics, PredictionOutcome};
use thiserror::Error;
use tracing::debug;

/// ML client error types
#[derive(Debug, Error)]
pub enum MlClientError {
    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Service returned status {0}")]
    Status(u16),

    #[error("Response did not match schema: {0}")]
    Decode(String),
}

/// Response body from `POST /predict`.
///
/// Deserialized separately from [`PredictionOutcome`] so an unknown
/// burnout label surfaces as [`MlClientError::Decode`], not a panic.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    burnout_risk: student_data::BurnoutRisk,
    attendance_risk: f64,
    exam_performance: f64,
}

/// Client for the external prediction service.
#[derive(Debug, Clone)]
pub struct MlServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl MlServiceClient {
    /// Create a client with the request timeout applied at the client
    /// level. The default in configuration is 10 seconds.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MlClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MlClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST the metrics to `{base_url}/predict` and decode the three
    /// risk estimates.
    pub async fn predict(&self, metrics: &DailyMetrics) -> Result<PredictionOutcome, MlClientError> {
        let url = format!("{}/predict", self.base_url);
        debug!(url = %url, "requesting prediction from ML service");

        let response = self
            .client
            .post(&url)
            .json(metrics)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MlClientError::Status(status.as_u16()));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| MlClientError::Decode(e.to_string()))?;

        Ok(PredictionOutcome {
            burnout_risk: body.burnout_risk,
            attendance_risk: body.attendance_risk,
            exam_performance: body.exam_performance,
        })
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn classify_request_error(err: reqwest::Error) -> MlClientError {
    if err.is_timeout() {
        MlClientError::Timeout
    } else {
        MlClientError::Transport(err.to_string())
    }
}
