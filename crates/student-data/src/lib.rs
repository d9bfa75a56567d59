//! Student Metrics Domain Types and Validation
//!
//! Provides the shared domain types for daily lifestyle metrics and
//! prediction outcomes, plus range validation for incoming submissions.

mod error;
mod metrics;
mod validator;

pub use error::ValidationError;
pub use metrics::{BurnoutRisk, DailyMetrics, PredictionOutcome};
pub use validator::{MetricsValidator, ValidationConfig};
