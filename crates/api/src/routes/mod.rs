//! Route Handlers

pub mod alerts;
pub mod auth;
pub mod predict;
pub mod student;
