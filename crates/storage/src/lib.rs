//! Storage Layer
//!
//! Provides SQLite persistence with repository pattern.

mod repository;
pub mod seed;

pub use repository::{AlertRecord, MetricsRecord, PredictionRow, Repository, UserRecord};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
}
