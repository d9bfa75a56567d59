//! Alert Engine Implementation

use serde::{Deserialize, Serialize};
use student_data::{BurnoutRisk, PredictionOutcome};

/// Alert severity, serialized lowercase for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

/// One derived alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

/// Alert thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Attendance risk above this is a danger alert
    pub attendance_danger: f64,
    /// Attendance risk above this is a warning
    pub attendance_warning: f64,
    /// Exam prediction below this is a danger alert
    pub exam_danger: f64,
    /// Exam prediction below this is a warning
    pub exam_warning: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            attendance_danger: 60.0,
            attendance_warning: 30.0,
            exam_danger: 60.0,
            exam_warning: 75.0,
        }
    }
}

/// Derives alerts from a prediction outcome. Pure threshold mapping,
/// at most one alert per indicator.
#[derive(Debug, Clone, Default)]
pub struct AlertEngine {
    config: AlertConfig,
}

impl AlertEngine {
    /// Create an engine with given thresholds
    pub fn new(config: AlertConfig) -> Self {
        Self { config }
    }

    /// Evaluate one outcome against all thresholds.
    pub fn evaluate(&self, outcome: &PredictionOutcome) -> Vec<Alert> {
        let mut alerts = Vec::new();

        match outcome.burnout_risk {
            BurnoutRisk::High => alerts.push(Alert {
                severity: Severity::Danger,
                title: "High Burnout Risk Detected".to_string(),
                message: "Your current patterns indicate a high risk of burnout. \
                          Please prioritize rest and consider adjusting your schedule."
                    .to_string(),
            }),
            BurnoutRisk::Medium => alerts.push(Alert {
                severity: Severity::Warning,
                title: "Moderate Burnout Risk".to_string(),
                message: "You're showing signs of moderate burnout risk. \
                          Monitor your stress levels and ensure adequate rest."
                    .to_string(),
            }),
            BurnoutRisk::Low => {}
        }

        if outcome.attendance_risk > self.config.attendance_danger {
            alerts.push(Alert {
                severity: Severity::Danger,
                title: "Critical Attendance Risk".to_string(),
                message: format!(
                    "Your attendance risk is {:.1}%. Focus on attending classes \
                     regularly to maintain good standing.",
                    outcome.attendance_risk
                ),
            });
        } else if outcome.attendance_risk > self.config.attendance_warning {
            alerts.push(Alert {
                severity: Severity::Warning,
                title: "Attendance Warning".to_string(),
                message: format!(
                    "Your attendance risk is {:.1}%. Consider improving your \
                     attendance patterns.",
                    outcome.attendance_risk
                ),
            });
        }

        if outcome.exam_performance < self.config.exam_danger {
            alerts.push(Alert {
                severity: Severity::Danger,
                title: "Low Exam Performance Prediction".to_string(),
                message: format!(
                    "Your predicted exam score is {:.1}%. Consider increasing \
                     study hours and seeking help.",
                    outcome.exam_performance
                ),
            });
        } else if outcome.exam_performance < self.config.exam_warning {
            alerts.push(Alert {
                severity: Severity::Warning,
                title: "Exam Performance Below Average".to_string(),
                message: format!(
                    "Your predicted exam score is {:.1}%. There's room for improvement.",
                    outcome.exam_performance
                ),
            });
        }

        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(risk: BurnoutRisk, attendance: f64, exam: f64) -> PredictionOutcome {
        PredictionOutcome {
            burnout_risk: risk,
            attendance_risk: attendance,
            exam_performance: exam,
        }
    }

    #[test]
    fn test_quiet_when_all_healthy() {
        let engine = AlertEngine::default();
        let alerts = engine.evaluate(&outcome(BurnoutRisk::Low, 10.0, 90.0));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_burnout_bands() {
        let engine = AlertEngine::default();

        let high = engine.evaluate(&outcome(BurnoutRisk::High, 10.0, 90.0));
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].severity, Severity::Danger);
        assert_eq!(high[0].title, "High Burnout Risk Detected");

        let medium = engine.evaluate(&outcome(BurnoutRisk::Medium, 10.0, 90.0));
        assert_eq!(medium[0].severity, Severity::Warning);
        assert_eq!(medium[0].title, "Moderate Burnout Risk");
    }

    #[test]
    fn test_attendance_bands() {
        let engine = AlertEngine::default();

        let danger = engine.evaluate(&outcome(BurnoutRisk::Low, 80.0, 90.0));
        assert_eq!(danger[0].title, "Critical Attendance Risk");
        assert!(danger[0].message.contains("80.0%"));

        let warning = engine.evaluate(&outcome(BurnoutRisk::Low, 50.0, 90.0));
        assert_eq!(warning[0].title, "Attendance Warning");

        // 30 is the band edge, not inside the warning band
        let edge = engine.evaluate(&outcome(BurnoutRisk::Low, 30.0, 90.0));
        assert!(edge.is_empty());
    }

    #[test]
    fn test_exam_bands() {
        let engine = AlertEngine::default();

        let danger = engine.evaluate(&outcome(BurnoutRisk::Low, 10.0, 55.5));
        assert_eq!(danger[0].title, "Low Exam Performance Prediction");
        assert!(danger[0].message.contains("55.5%"));

        let warning = engine.evaluate(&outcome(BurnoutRisk::Low, 10.0, 70.0));
        assert_eq!(warning[0].title, "Exam Performance Below Average");

        let edge = engine.evaluate(&outcome(BurnoutRisk::Low, 10.0, 75.0));
        assert!(edge.is_empty());
    }

    #[test]
    fn test_worst_case_stacks_three_alerts() {
        let engine = AlertEngine::default();
        let alerts = engine.evaluate(&outcome(BurnoutRisk::High, 80.0, 40.0));
        assert_eq!(alerts.len(), 3);
        assert!(alerts.iter().all(|a| a.severity == Severity::Danger));
    }

    #[test]
    fn test_severity_serialized_lowercase() {
        let alert = Alert {
            severity: Severity::Danger,
            title: "t".to_string(),
            message: "m".to_string(),
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "danger");
    }
}
