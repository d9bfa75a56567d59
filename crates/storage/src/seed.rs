//! Demo Seed Data
//!
//! Populates a demo student account with 30 days of back-dated metrics
//! so the dashboard has history to chart on a fresh install. Safe to run
//! repeatedly.

use chrono::{Duration, Utc};
use tracing::info;

use crate::{Repository, StorageError};
use student_data::DailyMetrics;

/// Demo account email.
pub const DEMO_EMAIL: &str = "test@example.com";
/// Demo account display name.
pub const DEMO_NAME: &str = "Test Student";

/// Plausible metrics for one seed day, varied deterministically so the
/// seeded history is stable across runs.
fn metrics_for_day(day: u32) -> DailyMetrics {
    DailyMetrics {
        // 6.5-8.75 hours
        sleep_hours: 6.5 + f64::from((day * 7) % 10) * 0.25,
        // 75-94 percent
        attendance_percentage: 75.0 + f64::from((day * 13) % 20),
        // 3.0-6.75 hours
        study_hours: 3.0 + f64::from((day * 11) % 16) * 0.25,
        // 3-7
        stress_level: 3 + ((day as i32 * 2) % 5),
        // 0-4
        deadlines_count: (day as i32 * 3) % 5,
    }
}

/// Create the demo user (if absent) and 30 days of metrics history (if
/// the user has none). `password_hash` is the already-hashed demo
/// password; hashing stays with the auth layer.
pub async fn run(repo: &Repository, password_hash: &str) -> Result<(), StorageError> {
    let user = match repo.find_user_by_email(DEMO_EMAIL).await? {
        Some(user) => {
            info!(user_id = user.id, "demo user already exists");
            user
        }
        None => {
            let user = repo.create_user(DEMO_EMAIL, password_hash, DEMO_NAME).await?;
            info!(user_id = user.id, "created demo user");
            user
        }
    };

    if repo.metrics_count(user.id).await? > 0 {
        info!("demo metrics already present, skipping");
        return Ok(());
    }

    let now = Utc::now();
    for day in 0..30u32 {
        let created_at = now - Duration::days(i64::from(29 - day));
        repo.insert_metrics_at(user.id, &metrics_for_day(day), created_at)
            .await?;
    }

    info!("seeded 30 days of demo metrics");
    Ok(())
}
