//! Fallback Prediction Rules
//!
//! Deterministic substitute for the ML service: a score-accumulation
//! burnout classifier, a step function for attendance risk, and a linear
//! model for exam performance. It runs only after the primary predictor
//! has already failed, so it must never fail itself -- every function
//! here is total and side-effect free.

use student_data::{BurnoutRisk, DailyMetrics, PredictionOutcome};

/// Derive all three risk estimates from one validated submission.
///
/// The caller is responsible for range validation; out-of-domain input
/// still produces numerically well-defined output.
pub fn predict(metrics: &DailyMetrics) -> PredictionOutcome {
    PredictionOutcome {
        burnout_risk: classify_burnout(burnout_score(metrics)),
        attendance_risk: attendance_risk(metrics.attendance_percentage),
        exam_performance: exam_performance(metrics),
    }
}

/// Accumulate the burnout score.
///
/// Conditions within a field are mutually exclusive and checked in
/// priority order (first matching range wins); no field contributes
/// negatively.
pub fn burnout_score(metrics: &DailyMetrics) -> u32 {
    let mut score = 0;

    score += if metrics.sleep_hours < 6.0 {
        30
    } else if metrics.sleep_hours < 7.0 {
        20
    } else {
        0
    };

    score += if metrics.stress_level > 7 {
        30
    } else if metrics.stress_level > 5 {
        15
    } else {
        0
    };

    score += if metrics.study_hours > 8.0 { 20 } else { 0 };

    score += if metrics.deadlines_count > 5 {
        20
    } else if metrics.deadlines_count > 3 {
        10
    } else {
        0
    };

    score
}

/// Map a burnout score to its category. Thresholds are inclusive on the
/// lower bound: exactly 60 is High, exactly 30 is Medium.
pub fn classify_burnout(score: u32) -> BurnoutRisk {
    if score >= 60 {
        BurnoutRisk::High
    } else if score >= 30 {
        BurnoutRisk::Medium
    } else {
        BurnoutRisk::Low
    }
}

/// Step function on attendance percentage, monotonically non-increasing.
/// Band boundaries are exclusive on the upper value: 70 itself falls
/// into the <80 band.
pub fn attendance_risk(attendance_percentage: f64) -> f64 {
    if attendance_percentage < 70.0 {
        80.0
    } else if attendance_percentage < 80.0 {
        50.0
    } else if attendance_percentage < 85.0 {
        30.0
    } else {
        10.0
    }
}

/// Linear model for predicted exam score, clamped to [0, 100] as the
/// terminal step after all additive terms.
pub fn exam_performance(metrics: &DailyMetrics) -> f64 {
    let mut score = 50.0;
    score += metrics.study_hours * 3.0;
    score += metrics.attendance_percentage * 0.3;
    score -= f64::from(metrics.stress_level) * 2.0;
    score += if metrics.sleep_hours >= 7.0 {
        10.0
    } else if metrics.sleep_hours >= 6.0 {
        5.0
    } else {
        -5.0
    };
    score -= f64::from(metrics.deadlines_count) * 2.0;

    score.clamp(0.0, 100.0)
}
