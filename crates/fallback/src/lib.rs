//! Rule-Based Fallback Predictor
//!
//! Provides rule-based risk estimates when the ML prediction service is
//! unavailable. Pure computation, no I/O, total over the metric domain.

mod rules;

pub use rules::{attendance_risk, burnout_score, classify_burnout, exam_performance, predict};
