//! Metrics Validator for Range Checking

use crate::error::ValidationError;
use crate::metrics::DailyMetrics;
use serde::{Deserialize, Serialize};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Sleep hours valid range
    pub sleep_range: (f64, f64),
    /// Attendance valid range (%)
    pub attendance_range: (f64, f64),
    /// Study hours valid range
    pub study_range: (f64, f64),
    /// Stress level valid range
    pub stress_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            sleep_range: (0.0, 24.0),
            attendance_range: (0.0, 100.0),
            study_range: (0.0, 24.0),
            stress_range: (1.0, 10.0),
        }
    }
}

/// Range validator for daily metrics submissions.
///
/// The API layer runs this before any predictor (primary or fallback)
/// sees the metrics; the predictors themselves never validate.
#[derive(Debug, Clone)]
pub struct MetricsValidator {
    config: ValidationConfig,
}

impl MetricsValidator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate sleep hours
    pub fn validate_sleep_hours(&self, hours: f64) -> Result<(), ValidationError> {
        self.validate_range("sleep_hours", hours, self.config.sleep_range)
    }

    /// Validate attendance percentage
    pub fn validate_attendance(&self, percentage: f64) -> Result<(), ValidationError> {
        self.validate_range("attendance_percentage", percentage, self.config.attendance_range)
    }

    /// Validate study hours
    pub fn validate_study_hours(&self, hours: f64) -> Result<(), ValidationError> {
        self.validate_range("study_hours", hours, self.config.study_range)
    }

    /// Validate stress level
    pub fn validate_stress_level(&self, level: i32) -> Result<(), ValidationError> {
        self.validate_range("stress_level", f64::from(level), self.config.stress_range)
    }

    /// Validate deadlines count (non-negative, no upper bound)
    pub fn validate_deadlines_count(&self, count: i32) -> Result<(), ValidationError> {
        if count < 0 {
            Err(ValidationError::Negative {
                field: "deadlines_count",
                value: f64::from(count),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a full submission, returning the first violation in
    /// field order (sleep, attendance, study, stress, deadlines).
    pub fn validate(&self, metrics: &DailyMetrics) -> Result<(), ValidationError> {
        self.validate_sleep_hours(metrics.sleep_hours)?;
        self.validate_attendance(metrics.attendance_percentage)?;
        self.validate_study_hours(metrics.study_hours)?;
        self.validate_stress_level(metrics.stress_level)?;
        self.validate_deadlines_count(metrics.deadlines_count)?;
        Ok(())
    }
}

impl Default for MetricsValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_domain() -> DailyMetrics {
        DailyMetrics {
            sleep_hours: 7.5,
            attendance_percentage: 88.0,
            study_hours: 4.0,
            stress_level: 4,
            deadlines_count: 2,
        }
    }

    #[test]
    fn test_valid_submission() {
        let validator = MetricsValidator::default();
        assert!(validator.validate(&in_domain()).is_ok());
    }

    #[test]
    fn test_sleep_hours_range() {
        let validator = MetricsValidator::default();
        assert!(validator.validate_sleep_hours(0.0).is_ok());
        assert!(validator.validate_sleep_hours(24.0).is_ok());
        assert!(validator.validate_sleep_hours(-0.5).is_err());
        assert!(validator.validate_sleep_hours(25.0).is_err());
    }

    #[test]
    fn test_stress_level_range() {
        let validator = MetricsValidator::default();
        assert!(validator.validate_stress_level(1).is_ok());
        assert!(validator.validate_stress_level(10).is_ok());
        assert!(validator.validate_stress_level(0).is_err());
        assert!(validator.validate_stress_level(11).is_err());
    }

    #[test]
    fn test_deadlines_non_negative() {
        let validator = MetricsValidator::default();
        assert!(validator.validate_deadlines_count(0).is_ok());
        assert!(validator.validate_deadlines_count(50).is_ok());
        assert!(validator.validate_deadlines_count(-1).is_err());
    }

    #[test]
    fn test_first_violation_in_field_order() {
        let validator = MetricsValidator::default();
        let metrics = DailyMetrics {
            sleep_hours: 30.0,
            attendance_percentage: 150.0,
            ..in_domain()
        };
        let err = validator.validate(&metrics).unwrap_err();
        match err {
            ValidationError::OutOfRange { field, .. } => assert_eq!(field, "sleep_hours"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_message_shape() {
        let validator = MetricsValidator::default();
        let err = validator.validate_sleep_hours(25.0).unwrap_err();
        assert_eq!(err.to_string(), "sleep_hours value 25 is out of range [0, 24]");
    }
}
