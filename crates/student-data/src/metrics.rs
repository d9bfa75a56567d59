//! Domain Types for Metrics and Predictions

use serde::{Deserialize, Serialize};

/// One daily lifestyle submission from a student.
///
/// Field names match the external prediction-service schema and the
/// database columns; the HTTP edge maps its camelCase names explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    /// Hours of sleep, [0, 24]
    pub sleep_hours: f64,
    /// Class attendance, [0, 100] percent
    pub attendance_percentage: f64,
    /// Hours of study, [0, 24]
    pub study_hours: f64,
    /// Self-reported stress, [1, 10]
    pub stress_level: i32,
    /// Upcoming deadlines, >= 0
    pub deadlines_count: i32,
}

/// Burnout risk category.
///
/// Serialized as the exact strings `"Low"`, `"Medium"`, `"High"` -- the
/// stable labels shared with the prediction service and the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurnoutRisk {
    Low,
    Medium,
    High,
}

impl BurnoutRisk {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BurnoutRisk::Low => "Low",
            BurnoutRisk::Medium => "Medium",
            BurnoutRisk::High => "High",
        }
    }
}

impl std::fmt::Display for BurnoutRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BurnoutRisk {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(BurnoutRisk::Low),
            "Medium" => Ok(BurnoutRisk::Medium),
            "High" => Ok(BurnoutRisk::High),
            other => Err(format!("unknown burnout risk label: {other}")),
        }
    }
}

/// The three risk estimates produced for one submission, whether by the
/// prediction service or the rule-based fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub burnout_risk: BurnoutRisk,
    /// Probability-style risk score, [0, 100]
    pub attendance_risk: f64,
    /// Predicted exam score, clamped to [0, 100]
    pub exam_performance: f64,
}
