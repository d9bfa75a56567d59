//! Repository Implementation

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::StorageError;
use student_data::{DailyMetrics, PredictionOutcome};

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One stored daily-metrics submission
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MetricsRecord {
    pub id: i64,
    pub user_id: i64,
    pub sleep_hours: f64,
    pub attendance_percentage: f64,
    pub study_hours: f64,
    pub stress_level: i64,
    pub deadlines_count: i64,
    pub created_at: DateTime<Utc>,
}

/// One stored prediction, primary or fallback. The source is not
/// recorded; both paths persist the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PredictionRow {
    pub id: i64,
    pub user_id: i64,
    pub student_data_id: Option<i64>,
    pub burnout_risk: String,
    pub attendance_risk: f64,
    pub exam_performance: f64,
    pub created_at: DateTime<Utc>,
}

/// Stored alert
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AlertRecord {
    pub id: i64,
    pub user_id: i64,
    pub severity: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Repository for data access, backed by a SQLite pool.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Connect to a SQLite database, creating the file if missing.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!(url = %database_url, "connected to SQLite database");
        Ok(Self { pool })
    }

    /// In-memory repository on a single connection. Used by tests and
    /// development runs without a database file.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // One connection only: each in-memory connection is its own db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Idempotent schema creation: tables plus secondary indexes.
    pub async fn init_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS student_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                sleep_hours REAL NOT NULL,
                attendance_percentage REAL NOT NULL,
                study_hours REAL NOT NULL,
                stress_level INTEGER NOT NULL,
                deadlines_count INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS predictions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                student_data_id INTEGER,
                burnout_risk TEXT NOT NULL,
                attendance_risk REAL NOT NULL,
                exam_performance REAL NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
                FOREIGN KEY (student_data_id) REFERENCES student_data(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS alerts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                severity TEXT NOT NULL,
                title TEXT NOT NULL,
                message TEXT NOT NULL,
                is_read INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        for index in [
            "CREATE INDEX IF NOT EXISTS idx_student_data_user_id ON student_data(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_student_data_created_at ON student_data(created_at)",
            "CREATE INDEX IF NOT EXISTS idx_predictions_user_id ON predictions(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_alerts_user_id ON alerts(user_id)",
        ] {
            sqlx::query(index).execute(&self.pool).await?;
        }

        debug!("database schema initialized");
        Ok(())
    }

    // -- users --

    /// Insert a user. Email uniqueness is enforced by the schema.
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<UserRecord, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash, name, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, email, password_hash, name, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = user.id, "created user");
        Ok(user)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, password_hash, name, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_user_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, password_hash, name, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // -- metrics --

    /// Append one metrics submission, timestamped now.
    pub async fn insert_metrics(
        &self,
        user_id: i64,
        metrics: &DailyMetrics,
    ) -> Result<MetricsRecord, StorageError> {
        self.insert_metrics_at(user_id, metrics, Utc::now()).await
    }

    /// Append one metrics submission with an explicit timestamp (used by
    /// the seed to back-date history).
    pub async fn insert_metrics_at(
        &self,
        user_id: i64,
        metrics: &DailyMetrics,
        created_at: DateTime<Utc>,
    ) -> Result<MetricsRecord, StorageError> {
        let record = sqlx::query_as::<_, MetricsRecord>(
            r#"
            INSERT INTO student_data
                (user_id, sleep_hours, attendance_percentage, study_hours,
                 stress_level, deadlines_count, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, sleep_hours, attendance_percentage,
                      study_hours, stress_level, deadlines_count, created_at
            "#,
        )
        .bind(user_id)
        .bind(metrics.sleep_hours)
        .bind(metrics.attendance_percentage)
        .bind(metrics.study_hours)
        .bind(metrics.stress_level)
        .bind(metrics.deadlines_count)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Newest-first metrics history for a user.
    pub async fn metrics_history(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<MetricsRecord>, StorageError> {
        let records = sqlx::query_as::<_, MetricsRecord>(
            r#"
            SELECT id, user_id, sleep_hours, attendance_percentage,
                   study_hours, stress_level, deadlines_count, created_at
            FROM student_data
            WHERE user_id = ?
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Id of the user's most recent metrics submission, if any.
    pub async fn latest_metrics_id(&self, user_id: i64) -> Result<Option<i64>, StorageError> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM student_data WHERE user_id = ? ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    /// Number of metrics rows for a user.
    pub async fn metrics_count(&self, user_id: i64) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM student_data WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    // -- predictions --

    /// Append a prediction outcome, linked to a metrics row when one
    /// exists. The burnout label is stored as its stable string.
    pub async fn insert_prediction(
        &self,
        user_id: i64,
        student_data_id: Option<i64>,
        outcome: &PredictionOutcome,
    ) -> Result<PredictionRow, StorageError> {
        let row = sqlx::query_as::<_, PredictionRow>(
            r#"
            INSERT INTO predictions
                (user_id, student_data_id, burnout_risk, attendance_risk,
                 exam_performance, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, student_data_id, burnout_risk,
                      attendance_risk, exam_performance, created_at
            "#,
        )
        .bind(user_id)
        .bind(student_data_id)
        .bind(outcome.burnout_risk.as_str())
        .bind(outcome.attendance_risk)
        .bind(outcome.exam_performance)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        debug!(prediction_id = row.id, "stored prediction");
        Ok(row)
    }

    /// Newest-first prediction history for a user.
    pub async fn prediction_history(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<PredictionRow>, StorageError> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT id, user_id, student_data_id, burnout_risk,
                   attendance_risk, exam_performance, created_at
            FROM predictions
            WHERE user_id = ?
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// The user's most recent prediction, if any.
    pub async fn latest_prediction(
        &self,
        user_id: i64,
    ) -> Result<Option<PredictionRow>, StorageError> {
        let row = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT id, user_id, student_data_id, burnout_risk,
                   attendance_risk, exam_performance, created_at
            FROM predictions
            WHERE user_id = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // -- alerts --

    /// Store an alert for later delivery.
    pub async fn insert_alert(
        &self,
        user_id: i64,
        severity: &str,
        title: &str,
        message: &str,
    ) -> Result<AlertRecord, StorageError> {
        let record = sqlx::query_as::<_, AlertRecord>(
            r#"
            INSERT INTO alerts (user_id, severity, title, message, is_read, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            RETURNING id, user_id, severity, title, message, is_read, created_at
            "#,
        )
        .bind(user_id)
        .bind(severity)
        .bind(title)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Newest-first unread alerts for a user.
    pub async fn unread_alerts(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<AlertRecord>, StorageError> {
        let records = sqlx::query_as::<_, AlertRecord>(
            r#"
            SELECT id, user_id, severity, title, message, is_read, created_at
            FROM alerts
            WHERE user_id = ? AND is_read = 0
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
