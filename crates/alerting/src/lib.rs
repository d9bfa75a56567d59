//! Alerting System
//!
//! Derives user-facing alerts from prediction outcomes via configurable
//! thresholds.

mod engine;

pub use engine::{Alert, AlertConfig, AlertEngine, Severity};
